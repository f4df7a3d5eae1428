//! Input bindings for hosts built on winit.
//!
//! The scene has a single user action, [`Action::Toggle`]. `Input` watches
//! window events, maps bound keys and mouse buttons to actions, and applies
//! them to a [`Scene`] at the start of the next frame:
//!
//! ```ignore
//! WindowEvent::RedrawRequested => {
//!     input.apply(&mut scene);
//!     scene.update(time.tick());
//!     renderer.draw(&scene.frame());
//! }
//! event => input.handle_event(&event),
//! ```

use crate::scene::Scene;
use std::collections::HashSet;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Something the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Switch between scattered and tree.
    Toggle,
}

/// A physical control that can trigger an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    /// A keyboard key, matched by physical position.
    Key(KeyCode),
    /// A mouse button.
    Mouse(MouseButton),
}

/// Bound controls and the actions queued since the last frame.
#[derive(Debug, Clone)]
pub struct Input {
    bindings: Vec<(Binding, Action)>,
    held: HashSet<Binding>,
    queued: Vec<Action>,
}

impl Input {
    /// Input with the default bindings: Space, Enter and left click toggle.
    pub fn new() -> Self {
        Self {
            bindings: vec![
                (Binding::Key(KeyCode::Space), Action::Toggle),
                (Binding::Key(KeyCode::Enter), Action::Toggle),
                (Binding::Mouse(MouseButton::Left), Action::Toggle),
            ],
            held: HashSet::new(),
            queued: Vec::new(),
        }
    }

    /// Input with no bindings.
    pub fn unbound() -> Self {
        Self {
            bindings: Vec::new(),
            held: HashSet::new(),
            queued: Vec::new(),
        }
    }

    /// Add a binding.
    pub fn bind(mut self, binding: Binding, action: Action) -> Self {
        self.bindings.push((binding, action));
        self
    }

    /// Whether a control is currently held down.
    pub fn is_held(&self, binding: Binding) -> bool {
        self.held.contains(&binding)
    }

    /// Actions waiting for the next [`apply`](Self::apply).
    pub fn pending(&self) -> &[Action] {
        &self.queued
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    let binding = Binding::Key(code);
                    match event.state {
                        ElementState::Pressed if !event.repeat => self.press(binding),
                        ElementState::Pressed => {}
                        ElementState::Released => self.release(binding),
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let binding = Binding::Mouse(*button);
                match state {
                    ElementState::Pressed => self.press(binding),
                    ElementState::Released => self.release(binding),
                }
            }
            WindowEvent::Focused(false) => self.held.clear(),
            _ => {}
        }
    }

    /// Run queued actions against the scene and clear the queue.
    ///
    /// Returns how many actions the scene accepted. A toggle during the
    /// lockout is dropped, not deferred.
    pub fn apply(&mut self, scene: &mut Scene) -> usize {
        let mut accepted = 0;
        for action in self.queued.drain(..) {
            match action {
                Action::Toggle => {
                    if scene.toggle() {
                        accepted += 1;
                    }
                }
            }
        }
        accepted
    }

    pub(crate) fn press(&mut self, binding: Binding) {
        // held keys do not fire again
        if !self.held.insert(binding) {
            return;
        }
        self.queued.extend(
            self.bindings
                .iter()
                .filter(|(b, _)| *b == binding)
                .map(|(_, action)| *action),
        );
    }

    pub(crate) fn release(&mut self, binding: Binding) {
        self.held.remove(&binding);
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TreeConfig;
    use crate::state::MorphState;

    fn tiny_scene() -> Scene {
        let config = TreeConfig::default()
            .with_foliage_count(10)
            .with_ornament_count(4)
            .with_ribbon_count(10)
            .with_ground_count(10);
        Scene::with_seed(config, 9).unwrap()
    }

    #[test]
    fn test_default_bindings_queue_toggle() {
        let mut input = Input::new();
        input.press(Binding::Key(KeyCode::Space));
        assert_eq!(input.pending(), &[Action::Toggle]);
        assert!(input.is_held(Binding::Key(KeyCode::Space)));
    }

    #[test]
    fn test_held_key_fires_once() {
        let mut input = Input::new();
        input.press(Binding::Mouse(MouseButton::Left));
        input.press(Binding::Mouse(MouseButton::Left));
        assert_eq!(input.pending().len(), 1);

        input.release(Binding::Mouse(MouseButton::Left));
        input.press(Binding::Mouse(MouseButton::Left));
        assert_eq!(input.pending().len(), 2);
    }

    #[test]
    fn test_unbound_key_ignored() {
        let mut input = Input::new();
        input.press(Binding::Key(KeyCode::KeyQ));
        assert!(input.pending().is_empty());

        let mut input = Input::unbound().bind(Binding::Key(KeyCode::KeyT), Action::Toggle);
        input.press(Binding::Key(KeyCode::Space));
        input.press(Binding::Key(KeyCode::KeyT));
        assert_eq!(input.pending(), &[Action::Toggle]);
    }

    #[test]
    fn test_apply_respects_lockout() {
        let mut scene = tiny_scene();
        let mut input = Input::new();
        input.press(Binding::Key(KeyCode::Space));
        input.press(Binding::Key(KeyCode::Enter));

        assert_eq!(input.apply(&mut scene), 1);
        assert!(input.pending().is_empty());
        assert_eq!(scene.state(), MorphState::TreeShape);
    }
}
