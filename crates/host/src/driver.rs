//! Feeds host events to the router and applies its output.

use crate::{
    world_position_from_hit_test, ArSession, Haptics, RunOptions, SceneHost, SessionConfiguration,
};
use anyhow::{Context, Result};
use arplace_core::{HostEvent, ImageDetectionEvent, RouterCommand};
use arplace_router::AnchorEventRouter;
use std::time::Duration;
use tracing::debug;

/// Owns the router and the three host collaborators.
///
/// Events must be handled one at a time from the host frame loop. Each one
/// goes through [`ArSession::observe`] before the router sees it. Commands
/// are applied in the order the router emits them before the next event is
/// looked at.
pub struct SessionDriver<S, G, H> {
    router: AnchorEventRouter,
    session: S,
    scene: G,
    haptics: H,
    dropped: usize,
}

impl<S, G, H> SessionDriver<S, G, H>
where
    S: ArSession,
    G: SceneHost,
    H: Haptics,
{
    /// Assemble a driver.
    pub fn new(router: AnchorEventRouter, session: S, scene: G, haptics: H) -> Self {
        Self {
            router,
            session,
            scene,
            haptics,
            dropped: 0,
        }
    }

    /// Start the session. Removing existing anchors also resets the router's
    /// image-anchor history.
    pub fn start(&mut self, config: SessionConfiguration, options: RunOptions) {
        if options.remove_existing_anchors {
            self.router.reset_image_anchors();
        }
        self.session.run(config, options);
    }

    /// Handle one host event and return every command applied for it.
    ///
    /// Events the session refuses, and add/update events for image anchors
    /// that were already consumed or dropped, are counted and yield no
    /// commands.
    pub fn handle(
        &mut self,
        event: &HostEvent,
        timestamp: Duration,
    ) -> Result<Vec<RouterCommand>> {
        if let HostEvent::AnchorAdded { anchor } | HostEvent::AnchorUpdated { anchor } = event {
            let phase = self.router.image_phase(anchor.id);
            if phase.is_retired() {
                debug!(anchor = %anchor.id, ?phase, "Dropping event for retired image anchor");
                self.dropped += 1;
                return Ok(Vec::new());
            }
        }
        if !self.session.observe(event) {
            self.dropped += 1;
            return Ok(Vec::new());
        }

        let mut applied = Vec::new();
        match event {
            HostEvent::AnchorAdded { anchor } => {
                self.scene.anchor_node_added(anchor.id);
                let added = self.router.on_anchor_added(anchor, timestamp);
                for mutation in added.mutations {
                    self.execute(RouterCommand::Scene(mutation), &mut applied)?;
                }
                if let Some(detection) = added.detection {
                    self.place_detected_image(&detection, &mut applied)?;
                }
            }
            HostEvent::AnchorUpdated { anchor } => {
                if let Some(record) = self.router.on_anchor_updated(anchor) {
                    self.execute(RouterCommand::Log(record), &mut applied)?;
                }
            }
            HostEvent::AnchorRemoved { id } => {
                self.scene.anchor_node_removed(*id);
                self.router.on_anchor_removed(*id);
            }
            HostEvent::Touch { point } => {
                let hit = world_position_from_hit_test(&self.session, *point);
                if let Some(mutation) = self.router.on_touch(&hit) {
                    self.execute(RouterCommand::Scene(mutation), &mut applied)?;
                }
            }
        }
        debug!(event = event.label(), commands = applied.len(), "Handled host event");
        Ok(applied)
    }

    /// The router.
    pub fn router(&self) -> &AnchorEventRouter {
        &self.router
    }

    /// The session host.
    pub fn session(&self) -> &S {
        &self.session
    }

    /// The scene host.
    pub fn scene(&self) -> &G {
        &self.scene
    }

    /// The haptics host.
    pub fn haptics(&self) -> &H {
        &self.haptics
    }

    /// Events dropped before reaching the router.
    pub fn dropped_events(&self) -> usize {
        self.dropped
    }

    fn place_detected_image(
        &mut self,
        detection: &ImageDetectionEvent,
        applied: &mut Vec<RouterCommand>,
    ) -> Result<()> {
        let id = detection.anchor.id;
        // The anchor leaves the session before any haptic or cube is applied.
        if let Err(err) = self.session.remove_anchor(id) {
            self.scene.anchor_node_removed(id);
            self.router.on_anchor_removed(id);
            return Err(err).with_context(|| format!("removing detected {id}"));
        }
        self.scene.anchor_node_removed(id);

        let placement = self
            .router
            .on_image_detected(detection)
            .with_context(|| format!("placing cube for {id}"))?;
        for command in placement.into_commands() {
            self.execute(command, applied)?;
        }
        Ok(())
    }

    fn execute(&mut self, command: RouterCommand, applied: &mut Vec<RouterCommand>) -> Result<()> {
        match &command {
            RouterCommand::Scene(mutation) => self
                .scene
                .apply(mutation)
                .with_context(|| format!("applying {}", mutation.node().id))?,
            RouterCommand::Haptic(_) => self.haptics.vibrate(),
            // Removal is applied ahead of the placement it belongs to.
            RouterCommand::RemoveAnchor(_) | RouterCommand::Log(_) => {}
        }
        applied.push(command);
        Ok(())
    }
}
