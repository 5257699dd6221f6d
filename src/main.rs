//! Slint front end: forwards raw input to the [`Editor`] core and mirrors
//! its state back into the window's properties.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use image::DynamicImage;
use slint::{ComponentHandle, ModelRc, Rgba8Pixel, SharedPixelBuffer, VecModel};

use multicrop::config::AppConfig;
use multicrop::export::export_regions_zip;
use multicrop::{CursorIcon, Editor, EditorEvent, Point, PointerButton};

slint::include_modules!();

struct AppState {
    editor: Editor,
    image: Option<DynamicImage>,
    image_path: Option<PathBuf>,
    pan_modifier: bool,
    last_pointer: Point,
}

impl AppState {
    fn new(config: &AppConfig) -> Self {
        let mut editor = Editor::new();
        editor.set_zoom_step(config.interaction.zoom_step);
        editor.set_handle_size(config.interaction.handle_size);
        Self {
            editor,
            image: None,
            image_path: None,
            pan_modifier: false,
            last_pointer: Point::new(0.0, 0.0),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let config = AppConfig::load();

    let ui = AppWindow::new()?;
    ui.set_sidebar_width(config.appearance.sidebar_width);
    ui.set_handle_size(config.interaction.handle_size);
    ui.set_image_source(placeholder_image());
    ui.set_status_text("No image loaded".into());

    let state = Rc::new(RefCell::new(AppState::new(&config)));
    setup_file_callbacks(&ui, state.clone());
    setup_pointer_callbacks(&ui, state.clone());
    setup_selection_callbacks(&ui, state.clone());

    ui.run()?;
    Ok(())
}

fn setup_file_callbacks(ui: &AppWindow, state: Rc<RefCell<AppState>>) {
    let ui_weak = ui.as_weak();
    let state_open = state.clone();
    ui.on_open_image(move || {
        let ui = ui_weak.unwrap();
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "gif", "webp"])
            .pick_file()
        else {
            return;
        };
        match image::open(&path) {
            Ok(img) => {
                let (w, h) = (img.width() as f32, img.height() as f32);
                let mut state = state_open.borrow_mut();
                ui.set_image_source(to_slint_image(&img));
                ui.set_has_image(true);
                state.image = Some(img);
                state.image_path = Some(path.clone());
                state
                    .editor
                    .set_image(w, h, ui.get_canvas_width(), ui.get_canvas_height());
                ui.set_status_text(
                    format!(
                        "{} ({}x{})",
                        path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default(),
                        w as u32,
                        h as u32
                    )
                    .into(),
                );
                apply_events(&ui, &mut state);
            }
            Err(e) => {
                log::error!("failed to open {}: {e}", path.display());
                ui.set_status_text(format!("Could not open {}", path.display()).into());
            }
        }
    });

    let ui_weak = ui.as_weak();
    let state_export = state.clone();
    ui.on_export_crops(move || {
        let ui = ui_weak.unwrap();
        let state = state_export.borrow();
        let Some(image) = state.image.clone() else {
            ui.set_status_text("Nothing to export: no image loaded".into());
            return;
        };
        if state.editor.store().is_empty() {
            ui.set_status_text("Nothing to export: no crops defined".into());
            return;
        }
        let stem = state
            .image_path
            .as_ref()
            .and_then(|p| p.file_stem())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let Some(dest) = rfd::FileDialog::new()
            .add_filter("ZIP archive", &["zip"])
            .set_file_name(format!("{stem}_crops.zip"))
            .save_file()
        else {
            return;
        };
        let regions = state.editor.store().snapshot();
        drop(state);

        ui.set_status_text("Exporting…".into());
        let weak = ui.as_weak();
        std::thread::spawn(move || {
            let message = match export_regions_zip(&image, &regions, &dest, &stem) {
                Ok(summary) => format!(
                    "Exported {} crop(s) to {}",
                    summary.exported,
                    dest.display()
                ),
                Err(e) => {
                    log::error!("export failed: {e:#}");
                    format!("Export failed: {e}")
                }
            };
            let _ = weak.upgrade_in_event_loop(move |ui| ui.set_status_text(message.into()));
        });
    });
}

fn setup_pointer_callbacks(ui: &AppWindow, state: Rc<RefCell<AppState>>) {
    let ui_weak = ui.as_weak();
    let state_down = state.clone();
    ui.on_pointer_down(move |x, y, button, alt| {
        let ui = ui_weak.unwrap();
        let mut state = state_down.borrow_mut();
        let view = Point::new(x, y);
        let modifier = alt || state.pan_modifier;
        state.editor.pointer_down(view, map_button(button), modifier);
        state.last_pointer = view;
        apply_events(&ui, &mut state);
        update_cursor(&ui, &state);
    });

    let ui_weak = ui.as_weak();
    let state_move = state.clone();
    ui.on_pointer_moved(move |x, y| {
        let ui = ui_weak.unwrap();
        let mut state = state_move.borrow_mut();
        let view = Point::new(x, y);
        state.editor.pointer_move(view);
        state.last_pointer = view;
        apply_events(&ui, &mut state);
        update_cursor(&ui, &state);
    });

    let ui_weak = ui.as_weak();
    let state_up = state.clone();
    ui.on_pointer_up(move |x, y, button| {
        let ui = ui_weak.unwrap();
        let mut state = state_up.borrow_mut();
        let view = Point::new(x, y);
        state.editor.pointer_up(view, map_button(button));
        state.last_pointer = view;
        apply_events(&ui, &mut state);
        update_cursor(&ui, &state);
    });

    let ui_weak = ui.as_weak();
    let state_wheel = state.clone();
    ui.on_wheel_zoom(move |x, y, delta_y| {
        let ui = ui_weak.unwrap();
        let mut state = state_wheel.borrow_mut();
        state.editor.wheel_zoom(Point::new(x, y), delta_y);
        apply_events(&ui, &mut state);
    });

    let ui_weak = ui.as_weak();
    let state_resize = state.clone();
    ui.on_view_resized(move |w, h| {
        let ui = ui_weak.unwrap();
        let mut state = state_resize.borrow_mut();
        state.editor.fit_view(w, h);
        apply_events(&ui, &mut state);
    });

    let ui_weak = ui.as_weak();
    let state_mod = state.clone();
    ui.on_pan_modifier_changed(move |down| {
        let ui = ui_weak.unwrap();
        let mut state = state_mod.borrow_mut();
        state.pan_modifier = down;
        update_cursor(&ui, &state);
    });
}

fn setup_selection_callbacks(ui: &AppWindow, state: Rc<RefCell<AppState>>) {
    let ui_weak = ui.as_weak();
    let state_row = state.clone();
    ui.on_row_clicked(move |id| {
        let ui = ui_weak.unwrap();
        let mut state = state_row.borrow_mut();
        state.editor.select(Some(id as u32));
        apply_events(&ui, &mut state);
    });

    let ui_weak = ui.as_weak();
    let state_delete = state.clone();
    ui.on_delete_selected(move || {
        let ui = ui_weak.unwrap();
        let mut state = state_delete.borrow_mut();
        state.editor.delete_selected();
        apply_events(&ui, &mut state);
        update_cursor(&ui, &state);
    });
}

/// Drains the editor's buffered events and refreshes only the affected
/// parts of the window.
fn apply_events(ui: &AppWindow, state: &mut AppState) {
    let events = state.editor.drain_events();
    if events.is_empty() {
        return;
    }
    let mut canvas = false;
    let mut list = false;
    for event in &events {
        match event {
            EditorEvent::RegionsChanged | EditorEvent::SelectionChanged(_) => {
                canvas = true;
                list = true;
            }
            EditorEvent::PreviewChanged | EditorEvent::ViewportChanged => canvas = true,
            EditorEvent::PointerContentPosition { x, y } => {
                ui.set_pointer_text(format!("({x:.0}, {y:.0})").into());
            }
        }
    }
    if canvas {
        refresh_canvas(ui, state);
    }
    if list {
        refresh_region_list(ui, state);
    }
}

fn refresh_canvas(ui: &AppWindow, state: &AppState) {
    let editor = &state.editor;
    let vp = editor.viewport();
    let scale = vp.scale();

    if let Some(bounds) = editor.content_bounds() {
        let origin = vp.to_view(Point::new(bounds.x, bounds.y));
        ui.set_image_x(origin.x);
        ui.set_image_y(origin.y);
        ui.set_image_w(bounds.width * scale);
        ui.set_image_h(bounds.height * scale);
    }

    let selected = editor.selected();
    let rects: Vec<CanvasRect> = editor
        .store()
        .iter()
        .map(|r| {
            let tl = vp.to_view(Point::new(r.rect.x, r.rect.y));
            CanvasRect {
                x: tl.x,
                y: tl.y,
                width: r.rect.width * scale,
                height: r.rect.height * scale,
                selected: selected == Some(r.id),
            }
        })
        .collect();
    ui.set_region_rects(ModelRc::new(VecModel::from(rects)));

    match editor.draw_preview() {
        Some(rect) => {
            let tl = vp.to_view(Point::new(rect.x, rect.y));
            ui.set_preview_x(tl.x);
            ui.set_preview_y(tl.y);
            ui.set_preview_w(rect.width * scale);
            ui.set_preview_h(rect.height * scale);
            ui.set_show_preview(true);
        }
        None => ui.set_show_preview(false),
    }

    let handles: Vec<HandleRect> = editor
        .selection_handles()
        .map(|anchors| {
            anchors
                .iter()
                .map(|a| {
                    let center = vp.to_view(a.position);
                    HandleRect {
                        x: center.x,
                        y: center.y,
                    }
                })
                .collect()
        })
        .unwrap_or_default();
    ui.set_handle_rects(ModelRc::new(VecModel::from(handles)));
}

fn refresh_region_list(ui: &AppWindow, state: &AppState) {
    let selected = state.editor.selected();
    let rows: Vec<RegionRow> = state
        .editor
        .store()
        .iter()
        .map(|r| RegionRow {
            id: r.id as i32,
            label: format!("Crop {}: (W: {:.0}, H: {:.0})", r.id, r.rect.width, r.rect.height)
                .into(),
            selected: selected == Some(r.id),
        })
        .collect();
    ui.set_region_rows(ModelRc::new(VecModel::from(rows)));
}

fn update_cursor(ui: &AppWindow, state: &AppState) {
    let icon = state
        .editor
        .cursor_at(state.last_pointer, state.pan_modifier);
    ui.set_cursor_kind(match icon {
        CursorIcon::Default => 0,
        CursorIcon::Crosshair => 1,
        CursorIcon::Move => 2,
        CursorIcon::ResizeNwSe => 3,
        CursorIcon::ResizeNeSw => 4,
        CursorIcon::Grab => 5,
        CursorIcon::Grabbing => 6,
    });
}

fn map_button(button: i32) -> PointerButton {
    match button {
        0 => PointerButton::Left,
        1 => PointerButton::Middle,
        _ => PointerButton::Other,
    }
}

fn to_slint_image(img: &DynamicImage) -> slint::Image {
    let rgba = img.to_rgba8();
    let buffer = SharedPixelBuffer::<Rgba8Pixel>::clone_from_slice(
        rgba.as_raw(),
        rgba.width(),
        rgba.height(),
    );
    slint::Image::from_rgba8(buffer)
}

/// Checkerboard shown in the empty-state panel before any image is open.
fn placeholder_image() -> slint::Image {
    const SIZE: u32 = 128;
    const CELL: u32 = 16;
    let mut buffer = SharedPixelBuffer::<Rgba8Pixel>::new(SIZE, SIZE);
    let pixels = buffer.make_mut_slice();
    for y in 0..SIZE {
        for x in 0..SIZE {
            let light = ((x / CELL) + (y / CELL)) % 2 == 0;
            let v = if light { 0x55 } else { 0x3a };
            pixels[(y * SIZE + x) as usize] = Rgba8Pixel {
                r: v,
                g: v,
                b: v,
                a: 255,
            };
        }
    }
    slint::Image::from_rgba8(buffer)
}
