//! Island Session
//!
//! Per-frame orchestration of the island scene: props, the player once its
//! model has loaded, the "Hold E" dance gesture, prompts and music.
//!
//! One tick runs, in order:
//!
//! 1. prop animation (spinning props)
//! 2. hold gesture: adopt the dance of the prop the player stands in, fill its prompt
//! 3. the movement controller
//! 4. prompt visibility from the overlap flags
//! 5. landing cue and background/dance music
//!
//! A session in portrait orientation is paused and ignores ticks apart from
//! releasing the hold gesture.

use tracing::{debug, info};

use super::audio::{AudioPort, SoundDirector};
use super::config::{CharacterTuning, GameSettings, IslandLayout, LayoutError};
use super::props::Prop;
use crate::input::{HoldGesture, InputSnapshot};
use crate::physics::Terrain;
use crate::player::{AnimationMixer, FrameTime, MovementController, TickOutcome};

pub struct IslandSession {
    settings: GameSettings,
    tuning: CharacterTuning,
    terrain: Terrain,
    props: Vec<Prop>,
    /// None until the character model has loaded
    player: Option<MovementController>,
    hold: HoldGesture,
    sound: SoundDirector,
    paused: bool,
}

impl IslandSession {
    pub fn new(settings: GameSettings, tuning: CharacterTuning, layout: &IslandLayout) -> Result<Self, LayoutError> {
        let props = layout.build_props()?;
        let mut session = Self {
            settings,
            tuning,
            terrain: layout.terrain(),
            props,
            player: None,
            hold: tuning.hold_gesture(),
            sound: SoundDirector::new(),
            paused: false,
        };
        session.apply_settings(settings);
        Ok(session)
    }

    /// Default settings, tuning and scene.
    pub fn with_defaults() -> Result<Self, LayoutError> {
        Self::new(GameSettings::default(), CharacterTuning::default(), &IslandLayout::default())
    }

    /// The character finished loading: build its controller and start its
    /// initial animation on `mixer`.
    pub fn spawn_player(&mut self, frame: FrameTime, mixer: &mut dyn AnimationMixer) {
        let controller = self.tuning.build_controller(frame.now);
        self.attach_player(controller, mixer);
    }

    /// Install an already built controller.
    pub fn attach_player(&mut self, controller: MovementController, mixer: &mut dyn AnimationMixer) {
        controller.attach(mixer);
        self.player = Some(controller);
        self.apply_settings(self.settings);
        info!(props = self.props.len(), "player attached");
    }

    /// Store new settings and push them to the player and props.
    pub fn apply_settings(&mut self, settings: GameSettings) {
        self.settings = settings;
        if let Some(player) = self.player.as_mut() {
            player.set_collision_enabled(settings.collision_detection);
            player.set_gravity_enabled(settings.gravity_enabled);
            player.set_show_collision_box(settings.show_collision_boxes);
            player.set_show_foot_boxes(settings.show_foot_boxes);
        }
        for prop in &mut self.props {
            prop.volume_mut().show_debug_box = settings.show_collision_boxes;
        }
    }

    /// Pause in portrait orientation, resume in landscape.
    ///
    /// Returns whether the session is now paused.
    pub fn on_resize(&mut self, width: u32, height: u32) -> bool {
        let portrait = height > width;
        if portrait != self.paused {
            if portrait {
                info!(width, height, "portrait orientation, pausing");
            } else {
                info!(width, height, "landscape orientation, resuming");
            }
        }
        self.paused = portrait;
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn props(&self) -> &[Prop] {
        &self.props
    }

    pub fn prop(&self, id: &str) -> Option<&Prop> {
        self.props.iter().find(|p| p.id() == id)
    }

    pub fn prop_mut(&mut self, id: &str) -> Option<&mut Prop> {
        self.props.iter_mut().find(|p| p.id() == id)
    }

    pub fn player(&self) -> Option<&MovementController> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut MovementController> {
        self.player.as_mut()
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn hold(&self) -> &HoldGesture {
        &self.hold
    }

    /// Advance the scene by one frame.
    ///
    /// Returns the controller outcome, or `None` while paused or before the
    /// player has loaded. An E key-up in `input` releases the gesture either way.
    pub fn tick(
        &mut self,
        frame: FrameTime,
        input: &InputSnapshot,
        mixer: &mut dyn AnimationMixer,
        audio: &mut dyn AudioPort,
    ) -> Option<TickOutcome> {
        // E key-ups apply even while paused or before the player loads.
        if input.interact_released {
            self.release_hold();
        }
        if self.paused {
            return None;
        }

        for prop in self.props.iter_mut().filter(|p| p.is_loaded()) {
            prop.update(frame.delta);
        }

        let player = self.player.as_mut()?;

        Self::update_hold(&mut self.hold, player, &mut self.props, frame, input);

        let outcome = player.update(frame, input, &self.terrain, &mut self.props, mixer);

        for prop in &mut self.props {
            let overlapping = player.registry().is_overlapping(prop.id());
            prop.prompt_mut().visible = overlapping && prop.action().is_some();
        }

        if outcome.landed_from_jump {
            self.sound.landing(&self.settings, audio);
        }
        let dancing = player.animation().dance_style();
        if dancing.is_some() {
            player.face_camera();
        }
        self.sound.apply(dancing, &self.settings, audio);

        Some(outcome)
    }

    fn release_hold(&mut self) {
        if self.hold.release().is_none() {
            return;
        }
        if let Some(player) = self.player.as_mut() {
            player.animation_mut().reset_idle_targets();
            if let Some(index) = prompt_target(player, &self.props) {
                self.props[index].prompt_mut().release();
            }
        }
        debug!("hold E released");
    }

    fn update_hold(
        hold: &mut HoldGesture,
        player: &mut MovementController,
        props: &mut [Prop],
        frame: FrameTime,
        input: &InputSnapshot,
    ) {
        // A press already followed by its release in the same snapshot never starts.
        if input.interact_pressed && input.keys.interact && !player.animation().is_dancing() {
            hold.press(frame.now);
            debug!("hold E started");
        }

        if !hold.is_held() {
            return;
        }

        let registry = player.registry();
        let dance = props
            .iter()
            .filter(|p| registry.is_overlapping(p.id()))
            .find_map(Prop::action);
        match dance {
            Some(action) => player.animation_mut().set_idle_targets(action),
            None => player.animation_mut().reset_idle_targets(),
        }

        if let Some(index) = prompt_target(player, props) {
            props[index].prompt_mut().advance(hold.progress(frame.now));
        }
    }
}

/// The prop whose "Hold E" prompt the gesture drives: the first overlapping
/// prop that carries an action. Obstacles never own a prompt.
fn prompt_target(player: &MovementController, props: &[Prop]) -> Option<usize> {
    let registry = player.registry();
    props
        .iter()
        .position(|p| p.action().is_some() && registry.is_overlapping(p.id()))
}
