use crate::prelude::*;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

pub struct ConfigEguiPlugin;

impl Plugin for ConfigEguiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, configure_visuals_system)
            .add_systems(Update, ui_system);
    }
}

fn configure_visuals_system(mut contexts: EguiContexts) {
    contexts.ctx_mut().set_visuals(egui::Visuals {
        window_corner_radius: 0.0.into(),
        ..Default::default()
    });
}

/// An edit is finished once a drag is released, or straight away for edits that do
/// not drag at all (typing, clicking).
fn edit_finished(response: &egui::Response) -> bool {
    response.drag_stopped() || (response.changed() && !response.dragged())
}

/// Holds back color picker changes until the picker is let go. The picker reports a
/// change on every frame the color moves, so the edit is only finished once no popup
/// is open or the pointer has been released.
#[derive(Default, Clone, Copy)]
struct ColorEditDebounce {
    pending: bool,
}

impl ColorEditDebounce {
    fn update(&mut self, changed: bool, picker_busy: bool) -> bool {
        self.pending |= changed;
        if self.pending && !picker_busy {
            self.pending = false;
            return true;
        }
        false
    }
}

/// A color picker popup is open and the pointer was not let go this frame.
fn picker_busy(ctx: &egui::Context) -> bool {
    ctx.memory(|m| m.any_popup_open()) && !ctx.input(|i| i.pointer.any_released())
}

/// Returns true when the picked color moved this frame.
fn color_row(ui: &mut egui::Ui, label: &str, color: &mut Rgb) -> bool {
    let mut srgb = color.to_srgb_u8();
    let changed = ui
        .horizontal(|ui| {
            let response = ui.color_edit_button_srgb(&mut srgb);
            ui.label(format!("{label} {}", color.to_hex()));
            response.changed()
        })
        .inner;
    if changed {
        *color = Rgb::from_srgb_u8(srgb);
    }
    changed
}

fn parameters_ui(
    params: &mut GalaxyParameters,
    ui: &mut egui::Ui,
    color_edits: &mut [ColorEditDebounce; 2],
    picker_busy: bool,
) -> bool {
    let minval = GalaxyParameters::MIN;
    let maxval = GalaxyParameters::MAX;
    let mut finished = false;

    finished |= edit_finished(
        &ui.add(
            egui::Slider::new(&mut params.count, minval.count..=maxval.count)
                .step_by(100.0)
                .text("Count"),
        ),
    );
    finished |= edit_finished(
        &ui.add(
            egui::Slider::new(&mut params.size, minval.size..=maxval.size)
                .step_by(0.001)
                .text("Size"),
        ),
    );
    finished |= edit_finished(
        &ui.add(
            egui::Slider::new(&mut params.radius, minval.radius..=maxval.radius)
                .step_by(0.01)
                .text("Radius"),
        ),
    );
    finished |= edit_finished(
        &ui.add(
            egui::Slider::new(&mut params.branches, minval.branches..=maxval.branches)
                .text("Branches"),
        ),
    );
    finished |= edit_finished(
        &ui.add(
            egui::Slider::new(&mut params.spin, minval.spin..=maxval.spin)
                .step_by(0.001)
                .text("Spin"),
        ),
    );
    finished |= edit_finished(
        &ui.add(
            egui::Slider::new(&mut params.randomness, minval.randomness..=maxval.randomness)
                .step_by(0.001)
                .text("Randomness"),
        ),
    );
    finished |= edit_finished(
        &ui.add(
            egui::Slider::new(
                &mut params.randomness_power,
                minval.randomness_power..=maxval.randomness_power,
            )
            .step_by(0.001)
            .text("Randomness Power"),
        ),
    );

    ui.separator();
    let inside_changed = color_row(ui, "Inside", &mut params.inside_color);
    finished |= color_edits[0].update(inside_changed, picker_busy);
    let outside_changed = color_row(ui, "Outside", &mut params.outside_color);
    finished |= color_edits[1].update(outside_changed, picker_busy);

    finished
}

fn ui_system(
    mut contexts: EguiContexts,
    mut draft: ResMut<GalaxySettingsDraft>,
    mut settings: ResMut<GalaxySettings>,
    mut color_edits: Local<[ColorEditDebounce; 2]>,
) {
    let ctx = contexts.ctx_mut();
    let picker_held = picker_busy(ctx);
    let draft = &mut draft.0;
    let mut commit = false;
    let mut regenerate = false;

    egui::SidePanel::left("side_panel")
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Galaxy");

            commit |= parameters_ui(&mut draft.parameters, ui, &mut color_edits, picker_held);
            ui.separator();

            egui::CollapsingHeader::new("Rendering").show(ui, |ui| {
                commit |= ui
                    .checkbox(&mut draft.size_attenuation, "Size attenuation")
                    .changed();

                let mut fixed_seed = draft.seed.is_some();
                let mut seed = draft.seed.unwrap_or_default();
                ui.horizontal(|ui| {
                    commit |= ui.checkbox(&mut fixed_seed, "Fixed seed").changed();
                    commit |= edit_finished(
                        &ui.add_enabled(fixed_seed, egui::DragValue::new(&mut seed)),
                    );
                });
                draft.seed = fixed_seed.then_some(seed);
            });

            regenerate = ui.button("Regenerate").clicked();
        });

    if commit {
        // generation stays owned by the applied settings
        let generation = settings.generation;
        *settings = GalaxySettings {
            generation,
            ..draft.clone()
        };
    }
    if regenerate {
        settings.regenerate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_picker_drag_commits_once() {
        let mut debounce = ColorEditDebounce::default();

        let mut commits = 0;
        for _ in 0..10 {
            commits += debounce.update(true, true) as u32;
        }
        assert_eq!(commits, 0);

        // release frame, the last move lands together with the release
        commits += debounce.update(true, false) as u32;
        assert_eq!(commits, 1);

        for _ in 0..5 {
            commits += debounce.update(false, false) as u32;
        }
        assert_eq!(commits, 1);
    }

    #[test]
    fn change_commits_when_picker_closes() {
        let mut debounce = ColorEditDebounce::default();

        assert!(!debounce.update(true, true));
        assert!(!debounce.update(false, true));
        assert!(debounce.update(false, false));
    }

    #[test]
    fn closing_picker_without_change_commits_nothing() {
        let mut debounce = ColorEditDebounce::default();

        assert!(!debounce.update(false, true));
        assert!(!debounce.update(false, false));
    }

    fn release_input() -> egui::RawInput {
        egui::RawInput {
            events: vec![
                egui::Event::PointerMoved(egui::pos2(10.0, 10.0)),
                egui::Event::PointerButton {
                    pos: egui::pos2(10.0, 10.0),
                    button: egui::PointerButton::Primary,
                    pressed: false,
                    modifiers: egui::Modifiers::default(),
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn picker_is_busy_only_while_open_and_held() {
        let ctx = egui::Context::default();
        let popup = egui::Id::new("color_popup");

        let mut closed = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            closed = Some(picker_busy(ctx));
        });
        assert_eq!(closed, Some(false));

        let mut held = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            ctx.memory_mut(|m| m.open_popup(popup));
            held = Some(picker_busy(ctx));
        });
        assert_eq!(held, Some(true));

        let mut released = None;
        let _ = ctx.run(release_input(), |ctx| {
            ctx.memory_mut(|m| m.open_popup(popup));
            released = Some(picker_busy(ctx));
        });
        assert_eq!(released, Some(false));
    }

    #[test]
    fn colors_are_debounced_independently() {
        let mut edits = [ColorEditDebounce::default(); 2];

        assert!(!edits[0].update(true, true));
        assert!(!edits[1].update(false, true));
        assert!(edits[0].update(false, false));
        assert!(!edits[1].update(false, false));
    }
}
