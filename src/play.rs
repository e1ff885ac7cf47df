#![allow(clippy::type_complexity)]

use bevy::prelude::*;

use crate::{
    dice::GameDice,
    prelude::*,
    session::{Fill, GameSession, SlotId, Swatch},
    state::GameState,
};

pub struct PlayPlugin;

impl Plugin for PlayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameSession>()
            .init_resource::<GameDice>()
            .add_systems(OnEnter(GameState::Load), spawn_layout)
            .add_systems(OnEnter(GameState::Playing), reveal_board)
            .add_systems(
                Update,
                (
                    advance_session,
                    (paint_strip, paint_score, paint_slots)
                        .run_if(resource_changed::<GameSession>),
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

// ——> SYSTEMS

/// spawn the start button, reference strip, score and every slot label
fn spawn_layout(mut commands: Commands, mut next_state: ResMut<NextState<GameState>>) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::Center,
            justify_content: JustifyContent::SpaceEvenly,
            ..default()
        })
        .with_children(|root| {
            root.spawn((
                StartButton,
                Button,
                Node {
                    padding: UiRect::axes(Val::Px(24.0), Val::Px(10.0)),
                    ..default()
                },
                BackgroundColor(START_BUTTON_COLOR),
            ))
            .with_children(|button| {
                button.spawn((
                    Text::new("Start"),
                    TextFont {
                        font_size: LABEL_FONT_SIZE,
                        ..default()
                    },
                    TextColor(Color::BLACK),
                ));
            })
            .observe(start_session);

            root.spawn((
                ColorStrip,
                Node {
                    width: Val::Px(STRIP_SIZE.x),
                    height: Val::Px(STRIP_SIZE.y),
                    ..default()
                },
                BackgroundColor(BG_COLOR),
                Visibility::Hidden,
            ));

            root.spawn((
                ScoreText,
                Text::new(""),
                TextFont {
                    font_size: LABEL_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::WHITE),
                Visibility::Hidden,
            ));

            // boxes
            root.spawn(Node {
                flex_wrap: FlexWrap::Wrap,
                justify_content: JustifyContent::Center,
                column_gap: Val::Px(SLOT_GAP_PX),
                row_gap: Val::Px(SLOT_GAP_PX),
                ..default()
            })
            .with_children(|row| {
                for index in 0..BOX_COUNT {
                    row.spawn(slot_label(SlotId::Box(index)))
                        .observe(click_slot);
                }
            });

            root.spawn(slot_label(SlotId::Bonus)).observe(click_slot);
        });

    next_state.set(GameState::Menu);
}

fn slot_label(id: SlotId) -> impl Bundle {
    (
        SlotLabel(id),
        Text::new(""),
        TextFont {
            font_size: LABEL_FONT_SIZE,
            ..default()
        },
        TextColor(Color::BLACK),
        TextLayout::new_with_justify(JustifyText::Center),
        Node {
            min_width: Val::Px(SLOT_SIZE_PX),
            min_height: Val::Px(SLOT_SIZE_PX),
            padding: UiRect::all(Val::Px(5.0)),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
        BackgroundColor(BG_COLOR),
        Visibility::Hidden,
    )
}

/// Observer on the start button. Starting twice is refused by the session itself.
fn start_session(
    _trigger: Trigger<Pointer<Click>>,
    mut session: ResMut<GameSession>,
    mut dice: ResMut<GameDice>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if session.start(&mut dice.0) {
        next_state.set(GameState::Playing);
    }
}

/// Observer on every slot label, forwards the click to the session.
fn click_slot(
    trigger: Trigger<Pointer<Click>>,
    labels: Query<&SlotLabel>,
    mut session: ResMut<GameSession>,
) {
    let Ok(label) = labels.get(trigger.entity()) else {
        return;
    };
    if let Some(outcome) = session.resolve_click(label.0) {
        info!(
            "{:?} clicked: {:?} {:+}, score {}",
            outcome.slot,
            outcome.verdict,
            outcome.delta,
            session.score()
        );
    }
}

fn reveal_board(
    mut start: Query<&mut Visibility, With<StartButton>>,
    mut shown: Query<
        &mut Visibility,
        (Or<(With<ColorStrip>, With<ScoreText>)>, Without<StartButton>),
    >,
) {
    for mut visibility in start.iter_mut() {
        *visibility = Visibility::Hidden;
    }
    for mut visibility in shown.iter_mut() {
        *visibility = Visibility::Inherited;
    }
}

fn advance_session(
    time: Res<Time>,
    mut session: ResMut<GameSession>,
    mut dice: ResMut<GameDice>,
) {
    session.advance(time.delta(), &mut dice.0);
}

fn paint_strip(
    session: Res<GameSession>,
    mut strip: Query<&mut BackgroundColor, With<ColorStrip>>,
) {
    let Some(reference) = session.reference() else {
        return;
    };
    for mut background in strip.iter_mut() {
        background.0 = swatch_color(reference);
    }
}

fn paint_score(session: Res<GameSession>, mut score: Query<&mut Text, With<ScoreText>>) {
    for mut text in score.iter_mut() {
        text.0 = session.score_text();
    }
}

fn paint_slots(
    session: Res<GameSession>,
    mut labels: Query<(
        &SlotLabel,
        &mut Text,
        &mut BackgroundColor,
        &mut Visibility,
        &mut Transform,
    )>,
) {
    for (label, mut text, mut background, mut visibility, mut transform) in labels.iter_mut() {
        let Some(view) = session.view(label.0) else {
            continue;
        };
        *visibility = if view.visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        background.0 = fill_color(view.fill);
        transform.scale = Vec3::new(view.scale, view.scale, 1.0);
        if text.0 != view.label {
            text.0 = view.label;
        }
    }
}

#[inline]
fn swatch_color(swatch: Swatch) -> Color {
    match swatch {
        Swatch::Red => RED,
        Swatch::Green => GREEN,
        Swatch::Yellow => YELLOW,
        Swatch::Pink => PINK,
        Swatch::Blue => BLUE,
    }
}

#[inline]
fn fill_color(fill: Fill) -> Color {
    match fill {
        Fill::Swatch(swatch) => swatch_color(swatch),
        Fill::Gold => GOLD,
        Fill::Affirm => AFFIRM_COLOR,
        Fill::Deny => DENY_COLOR,
    }
}

// ——> COMPONENTS

#[derive(Component)]
struct StartButton;

#[derive(Component)]
struct ColorStrip;

#[derive(Component)]
struct ScoreText;

/// which session slot a label draws and forwards clicks for
#[derive(Component, Debug)]
struct SlotLabel(SlotId);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn palette_colors_are_distinct() {
        let colors = Swatch::PALETTE.map(swatch_color);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
            assert_ne!(*a, GOLD);
        }
        assert_eq!(GOLD, fill_color(Fill::Gold));
        assert_eq!(BLUE, fill_color(Fill::Swatch(Swatch::Blue)));
    }

    #[test]
    fn layout_spawns_every_slot_and_moves_to_menu() {
        let mut app = App::new();
        app.add_plugins(bevy::state::app::StatesPlugin)
            .init_state::<GameState>()
            .add_systems(OnEnter(GameState::Load), spawn_layout);
        app.update();
        app.update();

        let world = app.world_mut();
        let mut ids: Vec<_> = world
            .query::<&SlotLabel>()
            .iter(world)
            .map(|label| label.0)
            .collect();
        ids.sort_by_key(|id| match id {
            SlotId::Box(index) => *index,
            SlotId::Bonus => BOX_COUNT,
        });
        let expected: Vec<_> = (0..BOX_COUNT)
            .map(SlotId::Box)
            .chain(std::iter::once(SlotId::Bonus))
            .collect();
        assert_eq!(expected, ids);
        assert_eq!(1, world.query::<&StartButton>().iter(world).count());
        assert_eq!(
            GameState::Menu,
            *world.resource::<State<GameState>>().get()
        );
    }

    fn visibility_of<C: Component>(world: &mut World) -> Visibility {
        *world.query_filtered::<&Visibility, With<C>>().single(world)
    }

    fn score_label(world: &mut World) -> String {
        world
            .query_filtered::<&Text, With<ScoreText>>()
            .single(world)
            .0
            .clone()
    }

    #[test]
    fn starting_swaps_start_button_for_strip_and_score() {
        let mut app = App::new();
        app.add_plugins((
            bevy::state::app::StatesPlugin,
            bevy::time::TimePlugin,
            PlayPlugin,
        ))
        .init_state::<GameState>();
        app.update();
        app.update();

        let world = app.world_mut();
        assert_eq!(Visibility::Inherited, visibility_of::<StartButton>(world));
        assert_eq!(Visibility::Hidden, visibility_of::<ColorStrip>(world));
        assert_eq!(Visibility::Hidden, visibility_of::<ScoreText>(world));

        let mut rng = fastrand::Rng::with_seed(3);
        assert!(world.resource_mut::<GameSession>().start(&mut rng));
        let reference = world.resource::<GameSession>().reference();
        world
            .resource_mut::<NextState<GameState>>()
            .set(GameState::Playing);
        app.update();
        app.update();

        let world = app.world_mut();
        assert_eq!(
            GameState::Playing,
            *world.resource::<State<GameState>>().get()
        );
        assert_eq!(Visibility::Hidden, visibility_of::<StartButton>(world));
        assert_eq!(Visibility::Inherited, visibility_of::<ColorStrip>(world));
        assert_eq!(Visibility::Inherited, visibility_of::<ScoreText>(world));
        assert_eq!("Score: 0", score_label(world));

        // a second start is refused and changes nothing
        assert!(!world.resource_mut::<GameSession>().start(&mut rng));
        app.update();

        let world = app.world_mut();
        assert_eq!(reference, world.resource::<GameSession>().reference());
        assert_eq!(
            GameState::Playing,
            *world.resource::<State<GameState>>().get()
        );
        assert_eq!(Visibility::Hidden, visibility_of::<StartButton>(world));
        assert_eq!("Score: 0", score_label(world));
    }
}
