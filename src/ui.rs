// ui.rs — egui panels around the panorama: menus, status bar, floor plan, marker editor

use std::path::PathBuf;
use std::time::Instant;

use crate::floorplan::{self, CanvasEvent, FloorPlanCanvas, Mode};
use crate::i18n::{tr, tr_with};
use crate::model::{Furnishing, Lighting, PhotoId};
use crate::panorama::FOV_PRESETS;
use crate::tour::{Audience, TourController};

/// Languages offered in the menu; each needs a table under `assets/i18n/`.
pub const LANGUAGES: [(&str, &str); 2] = [("en", "English"), ("zh-Hans", "简体中文")];

/// Something the UI asks the event loop to do after the frame.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    OpenApartment(String),
    SelectPhoto(PhotoId),
    AddPanorama(PathBuf),
    SetFov(f32),
    SetLighting(Lighting),
    SetFurnishing(Furnishing),
    SetAudience(Audience),
    ChangeLanguage(String),
    Canvas(CanvasEvent),
    Save,
    Exit,
}

/// Read-only numbers for the status bar.
#[derive(Debug, Clone, Default)]
pub struct StatusInfo {
    pub fov: f32,
    pub longitude: f32,
    pub latitude: f32,
    pub loading: bool,
    /// Image currently on the sphere, which lags the active photo while loading.
    pub showing: Option<String>,
}

/// Window toggles and transient messages that live across frames.
#[derive(Debug, Clone)]
pub struct UiState {
    pub lang: String,
    pub show_floor_plan: bool,
    pub show_apartments: bool,
    /// Last refusal from the floor-plan tools, shown under the toolbar.
    pub notice: Option<String>,
    /// Last failed image, shown in the status bar.
    pub load_error: Option<String>,
}

impl UiState {
    pub fn new(lang: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            show_floor_plan: true,
            show_apartments: false,
            notice: None,
            load_error: None,
        }
    }
}

pub fn draw_ui(
    ctx: &egui::Context,
    tour: &TourController,
    canvas: &mut FloorPlanCanvas,
    state: &mut UiState,
    status: StatusInfo,
) -> Vec<UiAction> {
    let mut actions = Vec::new();
    menu_bar(ctx, tour, state, &mut actions);
    status_bar(ctx, tour, state, &status);
    if state.show_apartments {
        apartment_list(ctx, tour, state, &mut actions);
    }
    if state.show_floor_plan && tour.apartment().is_some() {
        floor_plan_window(ctx, tour, canvas, state, &mut actions);
    }
    actions
}

fn menu_bar(ctx: &egui::Context, tour: &TourController, state: &mut UiState, actions: &mut Vec<UiAction>) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            // File
            ui.menu_button(tr("menu.file"), |ui| {
                if tour.is_admin() && ui.button(tr("menu.add_panorama")).clicked() {
                    ui.close_menu();
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter(&tr("file.filter.images"), &["jpg", "jpeg", "png", "webp"])
                        .pick_file()
                    {
                        actions.push(UiAction::AddPanorama(path));
                    }
                }
                if tour.is_admin() && ui.button(tr("menu.save")).clicked() {
                    actions.push(UiAction::Save);
                    ui.close_menu();
                }
                if ui.button(tr("menu.exit")).clicked() {
                    actions.push(UiAction::Exit);
                }
            });

            // View
            ui.menu_button(tr("menu.view"), |ui| {
                for fov in FOV_PRESETS {
                    let label = tr_with("view.fov_preset", &[("fov", format!("{fov:.0}"))]);
                    if ui.button(label).clicked() {
                        actions.push(UiAction::SetFov(fov));
                        ui.close_menu();
                    }
                }
                ui.separator();

                let mut lighting = tour.lighting();
                ui.radio_value(&mut lighting, Lighting::Day, tr("view.day"));
                ui.radio_value(&mut lighting, Lighting::Night, tr("view.night"));
                if lighting != tour.lighting() {
                    actions.push(UiAction::SetLighting(lighting));
                }
                ui.separator();

                let mut furnishing = tour.furnishing();
                ui.radio_value(&mut furnishing, Furnishing::Furnished, tr("view.furnished"));
                ui.radio_value(&mut furnishing, Furnishing::Empty, tr("view.empty"));
                if furnishing != tour.furnishing() {
                    actions.push(UiAction::SetFurnishing(furnishing));
                }
                ui.separator();

                ui.checkbox(&mut state.show_floor_plan, tr("view.floor_plan"));
                ui.checkbox(&mut state.show_apartments, tr("view.apartments"));
            });

            // Mode
            ui.menu_button(tr("menu.mode"), |ui| {
                let mut audience = tour.audience();
                ui.radio_value(&mut audience, Audience::Customer, tr("mode.customer"));
                ui.radio_value(&mut audience, Audience::Admin, tr("mode.admin"));
                if audience != tour.audience() {
                    actions.push(UiAction::SetAudience(audience));
                    ui.close_menu();
                }
            });

            // Language
            ui.menu_button(tr("menu.language"), |ui| {
                for (code, name) in LANGUAGES {
                    if ui.radio(state.lang == code, name).clicked() {
                        actions.push(UiAction::ChangeLanguage(code.to_string()));
                        ui.close_menu();
                    }
                }
            });
        });
    });
}

fn status_bar(ctx: &egui::Context, tour: &TourController, state: &UiState, status: &StatusInfo) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if status.loading {
                ui.label(egui::RichText::new(tr("status.loading_image")).color(egui::Color32::YELLOW));
                ui.label("|");
            } else if let Some(err) = &state.load_error {
                ui.label(egui::RichText::new(err).color(egui::Color32::LIGHT_RED));
                ui.label("|");
            }

            if let Some(apartment) = tour.apartment() {
                ui.label(&apartment.title);
                if let Some(photo) = tour.active_photo() {
                    let label = ui.label(format!("· {}", photo.name));
                    if let Some(showing) = &status.showing {
                        label.on_hover_text(showing);
                    }
                }
                ui.label("|");
            }

            ui.label(format!("FOV: {:.1}°", status.fov));
            ui.label("|");
            ui.label(format!("{} {:.1}°", tr("status.longitude"), status.longitude));
            ui.label("|");
            ui.label(format!("{} {:.1}°", tr("status.latitude"), status.latitude));
        });
    });
}

fn apartment_list(ctx: &egui::Context, tour: &TourController, state: &mut UiState, actions: &mut Vec<UiAction>) {
    egui::Window::new(tr("window.apartments"))
        .id(egui::Id::new("apartments"))
        .open(&mut state.show_apartments)
        .default_pos(egui::pos2(16.0, 48.0))
        .show(ctx, |ui| {
            let active = tour.apartment().map(|a| a.id.as_str());
            for apartment in tour.apartments() {
                let text = format!("{} · {}", apartment.title, apartment.location);
                if ui
                    .selectable_label(active == Some(apartment.id.as_str()), text)
                    .clicked()
                {
                    actions.push(UiAction::OpenApartment(apartment.id.clone()));
                }
            }

            if let Some(apartment) = tour.apartment() {
                ui.separator();
                ui.label(tr("window.photos"));
                for photo in &apartment.photos {
                    if ui
                        .selectable_label(tour.active_photo_id() == Some(photo.id.as_str()), &photo.name)
                        .clicked()
                    {
                        actions.push(UiAction::SelectPhoto(photo.id.clone()));
                    }
                }
            }
        });
}

fn floor_plan_window(
    ctx: &egui::Context,
    tour: &TourController,
    canvas: &mut FloorPlanCanvas,
    state: &mut UiState,
    actions: &mut Vec<UiAction>,
) {
    let mut open = state.show_floor_plan;
    egui::Window::new(tr("window.floor_plan"))
        .id(egui::Id::new("floor_plan"))
        .open(&mut open)
        .resizable(false)
        .default_pos(egui::pos2(16.0, 320.0))
        .show(ctx, |ui| {
            let mut events = Vec::new();
            if tour.is_admin() {
                events.extend(toolbar(ui, canvas, state));
            }
            if let Some(notice) = &state.notice {
                ui.label(egui::RichText::new(notice).color(egui::Color32::LIGHT_RED));
            }
            events.extend(floorplan::widget::show(ui, canvas));
            if tour.is_admin() {
                events.extend(marker_editor(ui, canvas));
            }
            actions.extend(events.into_iter().map(UiAction::Canvas));
        });
    state.show_floor_plan = open;
}

fn toolbar(ui: &mut egui::Ui, canvas: &mut FloorPlanCanvas, state: &mut UiState) -> Vec<CanvasEvent> {
    let mut events = Vec::new();
    ui.horizontal(|ui| {
        if ui
            .selectable_label(canvas.mode() == Mode::Draw, tr("canvas.draw"))
            .on_hover_text(tr("canvas.draw_hint"))
            .clicked()
        {
            events.extend(canvas.set_mode(Mode::Draw));
            state.notice = None;
        }
        if ui
            .selectable_label(canvas.mode() == Mode::Place, tr("canvas.move"))
            .on_hover_text(tr("canvas.move_hint"))
            .clicked()
        {
            events.extend(canvas.set_mode(Mode::Place));
            state.notice = None;
        }
        if ui.button(tr("canvas.add_marker")).clicked() {
            match canvas.add_marker(Instant::now()) {
                Ok(added) => {
                    events.extend(added);
                    state.notice = None;
                }
                Err(err) => {
                    log::warn!("{err}");
                    state.notice = Some(tr("canvas.no_photos"));
                }
            }
        }
        if ui.button(tr("canvas.reset")).clicked() {
            events.extend(canvas.reset());
        }
    });
    events
}

fn marker_editor(ui: &mut egui::Ui, canvas: &mut FloorPlanCanvas) -> Vec<CanvasEvent> {
    let Some(active) = canvas.active_hotspot().cloned() else {
        return Vec::new();
    };
    let mut events = Vec::new();
    ui.separator();
    ui.horizontal(|ui| {
        ui.label(tr("marker.label"));
        let mut label = active.label.clone();
        if ui.text_edit_singleline(&mut label).changed() {
            events.extend(canvas.set_hotspot_label(&active.id, label).unwrap_or_default());
        }
    });

    ui.horizontal(|ui| {
        ui.label(tr("marker.photo"));
        let current = canvas
            .photos()
            .iter()
            .find(|p| p.id == active.photo_id)
            .map_or_else(|| tr("marker.missing_photo"), |p| p.name.clone());
        let mut chosen = active.photo_id.clone();
        egui::ComboBox::from_id_source("marker_photo")
            .selected_text(current)
            .show_ui(ui, |ui| {
                for photo in canvas.photos() {
                    ui.selectable_value(&mut chosen, photo.id.clone(), &photo.name);
                }
            });
        if chosen != active.photo_id {
            events.extend(canvas.set_hotspot_photo(&active.id, chosen).unwrap_or_default());
        }
    });

    if ui.button(tr("marker.delete")).clicked() {
        events.extend(canvas.delete_hotspot(&active.id).unwrap_or_default());
    }
    events
}
