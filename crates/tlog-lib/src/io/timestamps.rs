use crate::error::{ReportError, Result};
use crate::io::table::{tab_reader, ColumnIndex};
use crate::trial::{RelationKey, RelationMap};
use log::{debug, info, warn};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const EVENT_COLUMN: &str = "Event";
pub const BLOCK_COLUMN: &str = "Session.Block.UID";
pub const TRIAL_COLUMN: &str = "Session.Trial.UID";
pub const ANNOTATION_COLUMN: &str = "Event.Annotation";

/// Event names that open a trial whose relation follows on the next row.
pub const TRIGGER_EVENTS: [&str; 2] = ["Hit.Start", "Miss.Start"];

/// One row of the timestamps export, fields trimmed. Fields absent from the row are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimestampEvent {
    pub event: String,
    pub block: String,
    pub trial: String,
    pub annotation: String,
}

impl TimestampEvent {
    pub fn is_trigger(&self) -> bool {
        TRIGGER_EVENTS.contains(&self.event.as_str())
    }
}

/// Value of the first `<tag>:{name:<value>,` record in an annotation.
///
/// The value is a non-empty run without `,` or `}` and must be followed by a
/// comma; occurrences that fail this are skipped in favor of later ones.
pub fn annotation_name<'a>(annotation: &'a str, tag: &str) -> Option<&'a str> {
    let prefix = format!("{}:{{name:", tag);
    let mut offset = 0;
    while let Some(found) = annotation[offset..].find(&prefix) {
        let start = offset + found + prefix.len();
        let rest = &annotation[start..];
        let len = rest.find([',', '}']).unwrap_or(rest.len());
        if len > 0 && rest[len..].starts_with(',') {
            return Some(&rest[..len]);
        }
        offset = offset + found + 1;
    }
    None
}

/// `"<drag> - <drop>"` when both records are present, otherwise empty.
pub fn parse_annotation(annotation: &str) -> String {
    match (
        annotation_name(annotation, "drag"),
        annotation_name(annotation, "drop"),
    ) {
        (Some(drag), Some(drop)) => format!("{} - {}", drag, drop),
        _ => String::new(),
    }
}

/// Join each Hit/Miss start event with the annotation of the row after it.
/// The final row can only be a successor, never a trigger.
pub fn build_relation_map(events: &[TimestampEvent]) -> RelationMap {
    let mut map = RelationMap::new();
    for pair in events.windows(2) {
        let (start, next) = (&pair[0], &pair[1]);
        if !start.is_trigger() {
            continue;
        }
        let key = RelationKey::new(start.block.as_str(), start.trial.as_str());
        let relation = parse_annotation(&next.annotation);
        if relation.is_empty() {
            debug!(
                "no drag/drop names after {} (block {}, trial {})",
                start.event,
                key.block,
                key.trial
            );
        }
        let (block, trial) = (key.block.clone(), key.trial.clone());
        if let Some(previous) = map.insert(key, relation) {
            warn!(
                "block {} trial {} seen again; replacing relation '{}'",
                block, trial, previous
            );
        }
    }
    map
}

/// Parse timestamp rows from any tab-delimited source.
pub fn parse_timestamp_events<R: Read>(source: R) -> csv::Result<Vec<TimestampEvent>> {
    let mut reader = tab_reader(source);
    let columns = ColumnIndex::from_headers(reader.headers()?);
    let mut events = Vec::new();
    for record in reader.records() {
        let record = record?;
        events.push(TimestampEvent {
            event: columns.field(&record, EVENT_COLUMN).to_string(),
            block: columns.field(&record, BLOCK_COLUMN).to_string(),
            trial: columns.field(&record, TRIAL_COLUMN).to_string(),
            annotation: columns.field(&record, ANNOTATION_COLUMN).to_string(),
        });
    }
    Ok(events)
}

pub fn read_timestamp_events(path: &Path) -> Result<Vec<TimestampEvent>> {
    let wrap = |source: csv::Error| ReportError::ReadTimestamps {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(|e| wrap(e.into()))?;
    parse_timestamp_events(file).map_err(wrap)
}

/// Read the timestamps export and build its relation map.
pub fn read_relation_map(path: &Path) -> Result<RelationMap> {
    let events = read_timestamp_events(path)?;
    let map = build_relation_map(&events);
    info!(
        "built {} relation(s) from {} timestamp row(s) in {}",
        map.len(),
        events.len(),
        path.display()
    );
    Ok(map)
}
