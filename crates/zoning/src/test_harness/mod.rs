//! # TestZoning: headless harness for the zoning plugin
//!
//! Wraps `bevy::app::App` + `ZoningPlugin` + `HostBookkeepingPlugin` with a
//! minimal stand-in for the host: an empty `ToolSystem`, a cursor raycast the
//! test points at entities and a photo-mode flag. Input is fed through the
//! same `ButtonInput` resources the host would update.

mod input;
mod queries;
mod spawning;

use bevy::app::App;
use bevy::prelude::*;

use crate::host::{CursorRaycast, HostBookkeepingPlugin, PhotoMode, ToolSystem};
use crate::ZoningPlugin;

pub use spawning::TestRoad;

pub struct TestZoning {
    app: App,
}

impl Default for TestZoning {
    fn default() -> Self {
        Self::new()
    }
}

impl TestZoning {
    pub fn new() -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins((ZoningPlugin, HostBookkeepingPlugin));

        app.insert_resource(ToolSystem::default());
        app.insert_resource(CursorRaycast::default());
        app.insert_resource(PhotoMode::default());

        app.update();
        Self { app }
    }

    pub fn world(&self) -> &World {
        self.app.world()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    /// Run `n` full updates. Button edges are consumed after each one, the
    /// way the host's input layer clears them between frames.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.update();
            let world = self.app.world_mut();
            world.resource_mut::<ButtonInput<MouseButton>>().clear();
            world.resource_mut::<ButtonInput<KeyCode>>().clear();
        }
    }
}
