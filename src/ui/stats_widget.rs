use crate::prelude::*;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

pub struct StatsWidgetPlugin;

impl Plugin for StatsWidgetPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_widget)
            .add_systems(Update, update_widget_system)
            .add_plugins(FrameTimeDiagnosticsPlugin::default());
    }
}

#[derive(Component, Clone, Copy)]
enum StatsLine {
    Fps,
    Points,
    BuildTime,
}

fn setup_widget(mut commands: Commands) {
    commands
        .spawn((
            Node {
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::FlexStart,
                position_type: PositionType::Absolute,
                width: Val::Px(240.),
                right: Val::Percent(1.),
                top: Val::Percent(1.),
                padding: UiRect::all(Val::Px(4.0)),
                ..default()
            },
            BackgroundColor(Color::linear_rgba(0.0, 0.03, 0.08, 0.5)),
            GlobalZIndex(i32::MAX - 1),
        ))
        .with_children(|parent| {
            for line in [StatsLine::Fps, StatsLine::Points, StatsLine::BuildTime] {
                parent.spawn((
                    line,
                    Text(" N/A".to_string()),
                    TextFont {
                        font_size: 16.0,
                        ..default()
                    },
                    Node {
                        padding: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                ));
            }
        });
}

/// `1234567` -> `1,234,567`
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn update_widget_system(
    diagnostics: Res<DiagnosticsStore>,
    stats: Res<GalaxyStats>,
    mut query: Query<(&mut Text, &StatsLine)>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
        .unwrap_or(0.0);
    let frame_time = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FRAME_TIME)
        .and_then(|frame_time| frame_time.smoothed())
        .unwrap_or(0.0);

    for (mut text, line) in &mut query {
        let (label, value) = match line {
            StatsLine::Fps => ("FPS:", format!("{fps:.1} ({frame_time:.2} ms)")),
            StatsLine::Points => ("Points:", group_thousands(stats.point_count)),
            StatsLine::BuildTime => (
                "Build:",
                format!("{:.1} ms", stats.generation_time.as_secs_f64() * 1000.0),
            ),
        };
        text.0 = format!("{:>7} {:<8}", label, value);
    }
}
