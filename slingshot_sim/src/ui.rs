//! Controls panel and status bar drawn with egui
//!
//! The panel never touches the simulation directly: everything the user does
//! is returned as a [`UiAction`] and applied by the app between frames.

use egui::{Color32, Context, RichText};
use nbody_core::config::{GRAVITY_RANGE, TIME_SCALE_RANGE};
use nbody_core::{Preset, SimEvent};

#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    Sim(SimEvent),
    LoadPreset(Preset),
    TogglePause,
}

/// Read-only snapshot of what the panel displays
#[derive(Debug, Clone, Copy)]
pub struct PanelView {
    pub time_scale: f32,
    pub gravity: f32,
    pub preset: Preset,
    pub bodies: usize,
    pub energy: f32,
    pub elapsed: f32,
    pub paused: bool,
}

pub struct Equation {
    pub name: &'static str,
    pub formula: &'static str,
    pub description: &'static str,
}

pub const SLINGSHOT_EQUATIONS: &[Equation] = &[
    Equation {
        name: "Newton's Law of Gravitation",
        formula: "F = G·m₁·m₂ / r²",
        description: "Skipped while r ≤ r₁ + r₂",
    },
    Equation {
        name: "Semi-implicit Euler",
        formula: "v' = v + (F/m)·Δt,  x' = x + v'·Δt",
        description: "New velocity moves the position",
    },
    Equation {
        name: "Circular Orbit Speed",
        formula: "v = √(G·M / r)",
        description: "Launch this fast, sideways, to orbit",
    },
    Equation {
        name: "Escape Velocity",
        formula: "v_esc = √(2·G·M / r)",
        description: "Launch faster than this and it never returns",
    },
    Equation {
        name: "Slingshot Launch",
        formula: "v = ½·(p_press − p_release)",
        description: "Drag back, let go",
    },
];

pub fn draw_controls(ctx: &Context, view: &PanelView, actions: &mut Vec<UiAction>) {
    egui::SidePanel::right("controls_panel")
        .resizable(true)
        .default_width(280.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(RichText::new("Simulation").color(Color32::LIGHT_BLUE));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(RichText::new("Clear").color(Color32::from_rgb(0, 242, 255))).clicked() {
                        actions.push(UiAction::Sim(SimEvent::Reset));
                    }
                    let label = if view.paused { "Resume" } else { "Pause" };
                    if ui.button(label).clicked() {
                        actions.push(UiAction::TogglePause);
                    }
                });
            });
            ui.separator();

            let mut time_scale = view.time_scale;
            let speed_slider = egui::Slider::new(&mut time_scale, TIME_SCALE_RANGE)
                .step_by(0.1)
                .suffix("x")
                .text("Time dilation");
            if ui.add(speed_slider).changed() {
                actions.push(UiAction::Sim(SimEvent::SetTimeScale(time_scale)));
            }

            let mut gravity = view.gravity;
            let gravity_slider = egui::Slider::new(&mut gravity, GRAVITY_RANGE)
                .step_by(0.01)
                .text("Gravity (G)");
            if ui.add(gravity_slider).changed() {
                actions.push(UiAction::Sim(SimEvent::SetGravity(gravity)));
            }

            egui::ComboBox::from_label("Preset")
                .selected_text(view.preset.name())
                .show_ui(ui, |ui| {
                    for preset in Preset::ALL {
                        if ui.selectable_label(preset == view.preset, preset.name()).clicked() {
                            actions.push(UiAction::LoadPreset(preset));
                        }
                    }
                });

            ui.add_space(8.0);
            ui.label(
                RichText::new("Left-drag on the plane to launch a planet")
                    .small()
                    .italics(),
            );
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.collapsing(RichText::new("📐 Equations").strong(), |ui| {
                    for eq in SLINGSHOT_EQUATIONS {
                        ui.group(|ui| {
                            ui.label(RichText::new(eq.name).strong().color(Color32::YELLOW));
                            ui.label(RichText::new(eq.formula).monospace().color(Color32::WHITE));
                            ui.label(RichText::new(eq.description).small().italics());
                        });
                        ui.add_space(4.0);
                    }
                });
            });
        });

    egui::TopBottomPanel::top("status").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(format!("Bodies: {}", view.bodies));
            ui.separator();
            ui.label(format!("Preset: {}", view.preset.name()));
            ui.separator();
            ui.label(format!("t = {:.1}", view.elapsed));
            ui.separator();
            ui.label(format!("E = {:.2}", view.energy));
            ui.separator();
            if view.paused {
                ui.label(RichText::new("PAUSED").color(Color32::YELLOW));
            } else {
                ui.label(RichText::new("RUNNING").color(Color32::GREEN));
            }
        });
    });
}
