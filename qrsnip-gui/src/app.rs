use eframe::egui;

use qrsnip::image::{Image, ImageSize};
use qrsnip::imgproc::color::gray_from_rgb_u8;
use qrsnip::imgproc::crop::crop_image;
use qrsnip::imgproc::interpolation::InterpolationMode;
use qrsnip::imgproc::resize::resize_native;
use qrsnip::imgproc::viewport::{self, SourceRegion};
use qrsnip::scan::{self, Decoded};

use crate::selection::Selection;

/// Fraction of the monitor the preview may cover.
const DISPLAY_FRACTION: f32 = 0.8;

/// Vertical room for the button row above the canvas.
const TOOLBAR_HEIGHT: f32 = 40.0;

/// Monitor size assumed when the backend cannot report one.
const FALLBACK_MONITOR: egui::Vec2 = egui::vec2(1920.0, 1080.0);

/// The preview built once from the source image.
struct Preview {
    texture: egui::TextureHandle,
    size: ImageSize,
    scale: f32,
}

/// The qrsnip window: preview canvas, selection rectangle, decode actions.
pub struct SnipApp {
    source: Image<u8, 3>,
    preview: Option<Preview>,
    selection: Selection,
}

impl SnipApp {
    pub fn new(source: Image<u8, 3>) -> Self {
        Self {
            source,
            preview: None,
            selection: Selection::default(),
        }
    }

    /// Build the preview on the first frame, once the monitor size is known.
    fn ensure_preview(&mut self, ctx: &egui::Context) {
        if self.preview.is_some() {
            return;
        }

        match self.build_preview(ctx) {
            Ok(preview) => {
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(
                    preview.size.width as f32,
                    preview.size.height as f32 + TOOLBAR_HEIGHT,
                )));
                self.preview = Some(preview);
            }
            Err(e) => {
                message_dialog(rfd::MessageLevel::Error, format!("Error: {e}"));
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }

    fn build_preview(&self, ctx: &egui::Context) -> anyhow::Result<Preview> {
        let monitor = ctx
            .input(|i| i.viewport().monitor_size)
            .unwrap_or(FALLBACK_MONITOR);
        let bounds = ImageSize {
            width: (monitor.x * DISPLAY_FRACTION) as usize,
            height: (monitor.y * DISPLAY_FRACTION) as usize,
        };

        // the scale is applied unconditionally, small images get upscaled
        let scale = viewport::fit_scale(self.source.size(), bounds);
        let size = viewport::fitted_size(self.source.size(), scale);
        log::debug!(
            "preview: source {} bounds {} scale {scale} fitted {}",
            self.source.size(),
            bounds,
            size
        );

        let mut resized = Image::from_size_val(size, 0)?;
        resize_native(&self.source, &mut resized, InterpolationMode::Bilinear)?;

        let color_image =
            egui::ColorImage::from_rgb([size.width, size.height], resized.as_slice());
        let texture = ctx.load_texture("preview", color_image, egui::TextureOptions::LINEAR);

        Ok(Preview {
            texture,
            size,
            scale,
        })
    }

    /// Decode the frozen selection and surface the outcome in dialogs.
    fn decode_selection(&self, scale: f32) {
        let Some(rect) = self.selection.selected_rect() else {
            message_dialog(
                rfd::MessageLevel::Warning,
                "No region selected. Drag a rectangle over the QR code first.",
            );
            return;
        };

        let region = viewport::to_source_region(&rect, scale, self.source.size());
        log::debug!("decode: display {rect:?} -> source {region:?}");

        match decode_region(&self.source, &region) {
            Ok(results) if results.is_empty() => {
                message_dialog(
                    rfd::MessageLevel::Info,
                    "No QR code found in the selected region",
                );
            }
            Ok(results) => {
                for decoded in results {
                    message_dialog(
                        rfd::MessageLevel::Info,
                        format!("{}: {}", decoded.symbology, decoded.content),
                    );
                }
            }
            Err(e) => message_dialog(rfd::MessageLevel::Error, format!("Error: {e}")),
        }
    }
}

impl eframe::App for SnipApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_preview(ctx);

        let Some((texture_id, preview_size, scale)) = self
            .preview
            .as_ref()
            .map(|p| (p.texture.id(), p.size, p.scale))
        else {
            return;
        };

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Decode QR").clicked() {
                    self.decode_selection(scale);
                }
                if ui.button("Clear Selection").clicked() {
                    self.selection.clear();
                }
                if ui.button("Exit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
            ui.separator();

            let canvas_size = egui::vec2(preview_size.width as f32, preview_size.height as f32);
            let (rect, response) =
                ui.allocate_exact_size(canvas_size, egui::Sense::click_and_drag());
            ui.painter().image(
                texture_id,
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );

            if let Some(pos) = response.interact_pointer_pos() {
                let local = (pos.x - rect.min.x, pos.y - rect.min.y);
                if response.drag_started() {
                    self.selection.press(local);
                } else if response.dragged() {
                    self.selection.drag(local);
                }
            }
            if response.drag_stopped() {
                self.selection.release();
            }

            if let Some(selected) = self.selection.rect() {
                let outline = egui::Rect::from_min_max(
                    rect.min + egui::vec2(selected.min_x, selected.min_y),
                    rect.min + egui::vec2(selected.max_x, selected.max_y),
                );
                ui.painter().rect_stroke(
                    outline,
                    0.0,
                    egui::Stroke::new(2.0, egui::Color32::RED),
                    egui::StrokeKind::Inside,
                );
            }
        });
    }
}

/// Crop the source to `region`, grayscale it and decode with the
/// binary-threshold fallback.
///
/// An empty region yields zero symbols rather than an error.
fn decode_region(source: &Image<u8, 3>, region: &SourceRegion) -> anyhow::Result<Vec<Decoded>> {
    if region.is_empty() {
        return Ok(Vec::new());
    }

    let crop_size = ImageSize {
        width: region.width,
        height: region.height,
    };

    let mut crop = Image::from_size_val(crop_size, 0)?;
    crop_image(source, &mut crop, region.x, region.y)?;

    let mut gray = Image::from_size_val(crop_size, 0)?;
    gray_from_rgb_u8(&crop, &mut gray)?;

    let results = scan::decode_with_fallback(&gray)?;
    log::debug!(
        "region {}x{}+{}+{} yielded {} symbol(s)",
        region.width,
        region.height,
        region.x,
        region.y,
        results.len()
    );

    Ok(results)
}

/// Show a blocking message dialog at the given level.
fn message_dialog(level: rfd::MessageLevel, text: impl Into<String>) {
    rfd::MessageDialog::new()
        .set_level(level)
        .set_title("qrsnip")
        .set_description(text.into())
        .show();
}
