use eframe::{egui, egui::ViewportBuilder};
use rfd::{FileDialog, MessageDialog, MessageLevel};
use std::path::PathBuf;
use tlog_lib::pipeline::{run, with_default_extension, ReportPaths};

fn main() -> eframe::Result<()> {
    env_logger::init();
    let native_options = eframe::NativeOptions {
        viewport: ViewportBuilder::default().with_inner_size([640.0, 260.0]),
        ..Default::default()
    };
    eframe::run_native(
        "tlog report",
        native_options,
        Box::new(|_cc| Ok(Box::<TlogApp>::default())),
    )
}

#[derive(Copy, Clone, PartialEq)]
enum PathSlot {
    Header,
    Data,
    Timestamps,
    Out,
}

impl PathSlot {
    fn label(&self) -> &'static str {
        match self {
            PathSlot::Header => "Header file",
            PathSlot::Data => "Data file",
            PathSlot::Timestamps => "Timestamps file",
            PathSlot::Out => "Report output",
        }
    }

    fn all() -> [PathSlot; 4] {
        [
            PathSlot::Header,
            PathSlot::Data,
            PathSlot::Timestamps,
            PathSlot::Out,
        ]
    }

    fn pick(&self) -> Option<PathBuf> {
        match self {
            PathSlot::Out => FileDialog::new()
                .add_filter("Text", &["txt"])
                .set_file_name("report.txt")
                .save_file()
                .map(with_default_extension),
            _ => FileDialog::new()
                .add_filter("Text", &["txt", "tsv"])
                .add_filter("All files", &["*"])
                .pick_file(),
        }
    }
}

#[derive(Default)]
struct TlogApp {
    header: Option<PathBuf>,
    data: Option<PathBuf>,
    timestamps: Option<PathBuf>,
    out: Option<PathBuf>,
}

impl TlogApp {
    fn slot_mut(&mut self, slot: PathSlot) -> &mut Option<PathBuf> {
        match slot {
            PathSlot::Header => &mut self.header,
            PathSlot::Data => &mut self.data,
            PathSlot::Timestamps => &mut self.timestamps,
            PathSlot::Out => &mut self.out,
        }
    }

    fn paths(&self) -> Option<ReportPaths> {
        Some(ReportPaths {
            header: self.header.clone()?,
            data: self.data.clone()?,
            timestamps: self.timestamps.clone()?,
            out: self.out.clone()?,
        })
    }

    fn process(&self, paths: &ReportPaths) {
        match run(paths) {
            Ok(report) => {
                MessageDialog::new()
                    .set_level(MessageLevel::Info)
                    .set_title("Report written")
                    .set_description(format!(
                        "{} trial(s) written to {}",
                        report.rows.len(),
                        paths.out.display()
                    ))
                    .show();
            }
            Err(err) => {
                log::error!("report run failed: {}", err);
                MessageDialog::new()
                    .set_level(MessageLevel::Error)
                    .set_title("Processing failed")
                    .set_description(err.to_string())
                    .show();
            }
        }
    }
}

impl eframe::App for TlogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Hit/miss report");
            ui.add_space(8.0);
            egui::Grid::new("paths")
                .num_columns(3)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    for slot in PathSlot::all() {
                        ui.label(slot.label());
                        let shown = self
                            .slot_mut(slot)
                            .as_ref()
                            .map(|p| p.display().to_string())
                            .unwrap_or_else(|| "(none)".into());
                        ui.monospace(shown);
                        if ui.button("Browse…").clicked() {
                            if let Some(path) = slot.pick() {
                                *self.slot_mut(slot) = Some(path);
                            }
                        }
                        ui.end_row();
                    }
                });
            ui.add_space(12.0);
            let paths = self.paths();
            if ui
                .add_enabled(paths.is_some(), egui::Button::new("Process"))
                .clicked()
            {
                if let Some(paths) = paths {
                    self.process(&paths);
                }
            }
        });
    }
}
