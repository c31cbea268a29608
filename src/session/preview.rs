use crate::{
    eval::evaluator::{Evaluator, RenderDescription},
    eval::visibility::VisibilityCache,
    foundation::core::{AspectRatio, SurfaceSize},
    foundation::error::PlayerResult,
    markers::resolver::{MarkerResolver, MarkerSource, MarkerStatus, MarkerUpdate},
    playback::audio::{AudioEvent, AudioSync, NarrationTrack},
    playback::clock::{ClockEvent, FrameScheduler, PlaybackClock, Playhead, resolve_duration},
    playback::notice::{Notice, NoticeBoard, NoticeKind},
    scene::model::Scene,
    session::navigator::{SceneNavigator, Selection},
    session::opts::PreviewOpts,
    transform::viewport::ViewportTransform,
};

/// One open preview: the play-head, the active scene and everything derived from it.
///
/// All mutation happens on the caller's thread. Hosts either drive the session with
/// [`PreviewSession::pump`] (frames from the [`FrameScheduler`]) or feed wall-time deltas to
/// [`PreviewSession::tick`] directly. Each call returns the [`RenderDescription`] of the frame.
///
/// Every exit path (`close`, `open` over an open session, drop) runs the same teardown.
pub struct PreviewSession {
    opts: PreviewOpts,
    source: Box<dyn MarkerSource>,
    narration: Box<dyn NarrationTrack>,
    scheduler: Box<dyn FrameScheduler>,

    navigator: SceneNavigator,
    markers: MarkerResolver,
    visibility: VisibilityCache,
    clock: PlaybackClock,
    audio: AudioSync,
    notices: NoticeBoard,

    surface: SurfaceSize,
    viewport: ViewportTransform,
    fullscreen: bool,
    open: bool,
}

impl PreviewSession {
    /// Construct a closed session around the host's collaborators.
    pub fn new(
        opts: PreviewOpts,
        source: Box<dyn MarkerSource>,
        narration: Box<dyn NarrationTrack>,
        scheduler: Box<dyn FrameScheduler>,
    ) -> PlayerResult<Self> {
        opts.validate()?;
        let surface = SurfaceSize::default();
        Ok(Self {
            navigator: SceneNavigator::default(),
            markers: MarkerResolver::new(),
            visibility: VisibilityCache::new(),
            clock: PlaybackClock::new(opts.frame_interval_ms),
            audio: AudioSync::new(
                opts.drift_tolerance_ms,
                opts.audio_retry_limit,
                opts.audio_retry_delay_ms,
            ),
            notices: NoticeBoard::new(opts.notice_ttl_ms),
            viewport: ViewportTransform::fit_with_fallback(
                AspectRatio::default().canvas(),
                surface,
                opts.fallback_scale,
            ),
            surface,
            fullscreen: false,
            open: false,
            opts,
            source,
            narration,
            scheduler,
        })
    }

    /// `open(sceneList, startIndex)`: activate the first playable scene at or after
    /// `start_index`.
    ///
    /// Fails with a navigation error (and stays closed) when no such scene exists.
    #[tracing::instrument(skip(self, scenes), fields(scenes = scenes.len()))]
    pub fn open(&mut self, scenes: Vec<Scene>, start_index: usize) -> PlayerResult<()> {
        if self.open {
            self.close();
        }

        let mut navigator = SceneNavigator::new(scenes);
        let sel = navigator.select(start_index)?;
        self.navigator = navigator;
        self.open = true;
        self.report_skipped(&sel);
        self.activate();
        Ok(())
    }

    /// Stop the frame loop, rewind the narration and release fullscreen.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.teardown();
        tracing::debug!("preview closed");
    }

    /// `true` between a successful `open` and `close`.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Play/pause. Returns the new `is_playing`.
    pub fn toggle_play(&mut self) -> bool {
        if !self.open {
            return false;
        }
        if self.clock.is_playing() {
            self.clock.pause();
            self.scheduler.stop();
            self.audio.stop(self.narration.as_mut());
            return false;
        }
        if !self.clock.play() {
            return false;
        }
        self.scheduler.start();
        let event = self
            .audio
            .start(self.narration.as_mut(), self.clock.current_time());
        self.handle_audio(event);
        true
    }

    /// Scrub to `fraction` (`0..=1`) of the scene. Returns the new time in seconds.
    pub fn seek(&mut self, fraction: f64) -> f64 {
        if !self.open {
            return 0.0;
        }
        let t = self.clock.seek_fraction(fraction);
        self.narration.seek(t);
        t
    }

    /// Set volume (`0..=100`). Returns the stored volume.
    pub fn set_volume(&mut self, volume: f64) -> u8 {
        self.audio.set_volume(self.narration.as_mut(), volume)
    }

    /// Flip mute. Returns the new mute state.
    pub fn toggle_mute(&mut self) -> bool {
        self.audio.toggle_mute(self.narration.as_mut())
    }

    /// Activate the next playable scene.
    ///
    /// On failure a notice is posted and the active scene is left untouched.
    #[tracing::instrument(skip(self))]
    pub fn next(&mut self) -> PlayerResult<()> {
        let result = self.navigator.next();
        self.navigate(result)
    }

    /// Activate the previous playable scene.
    #[tracing::instrument(skip(self))]
    pub fn prev(&mut self) -> PlayerResult<()> {
        let result = self.navigator.prev();
        self.navigate(result)
    }

    /// Request or release fullscreen. Returns the new state.
    pub fn toggle_fullscreen(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.fullscreen = !self.fullscreen;
        self.fullscreen
    }

    /// Report the measured surface size; geometry is refit immediately.
    pub fn resize(&mut self, surface: SurfaceSize) {
        self.surface = surface;
        self.refit();
    }

    /// Pull the next frame from the scheduler, if one is due.
    pub fn pump(&mut self) -> Option<RenderDescription> {
        let ts = self.scheduler.next_frame()?;
        let delta = self.clock.frame_delta(ts);
        Some(self.tick(delta))
    }

    /// Advance by `delta_ms` of wall time and describe the resulting frame.
    pub fn tick(&mut self, delta_ms: f64) -> RenderDescription {
        if self.open {
            self.notices.tick(delta_ms);

            let update = self.markers.poll(self.source.as_mut());
            self.handle_markers(update);

            if self.clock.advance(delta_ms) == ClockEvent::Ended {
                self.scheduler.stop();
                self.audio.stop(self.narration.as_mut());
            } else {
                let event = self.audio.reconcile(
                    self.narration.as_mut(),
                    self.clock.current_time(),
                    self.clock.is_playing(),
                    delta_ms,
                );
                self.handle_audio(event);
            }
        }
        self.render()
    }

    /// Describe the frame at the current play-head without advancing.
    pub fn render(&mut self) -> RenderDescription {
        let (scene_id, background, elements) = match self.navigator.current() {
            Some(scene) if self.open => {
                let elements = Evaluator::eval_elements(
                    scene,
                    self.clock.current_time(),
                    &self.viewport,
                    &self.markers,
                    &mut self.visibility,
                    self.opts.transition_params(),
                );
                (
                    Some(scene.id.clone()),
                    Some(scene.background.clone()),
                    elements,
                )
            }
            _ => (None, None, Vec::new()),
        };
        let fingerprint = Evaluator::fingerprint(background.as_ref(), &self.viewport, &elements);

        RenderDescription {
            scene_id,
            playhead: self.clock.playhead(),
            surface: self.surface,
            scale: self.viewport.scale(),
            letterbox: self.viewport.letterbox(),
            background,
            elements,
            markers: self.markers.status(),
            notices: self.notices.active().to_vec(),
            volume: self.audio.volume(),
            muted: self.audio.is_muted(),
            fullscreen: self.fullscreen,
            fingerprint,
        }
    }

    /// Play-head state.
    pub fn playhead(&self) -> Playhead {
        self.clock.playhead()
    }

    /// Active scene, while open.
    pub fn active_scene(&self) -> Option<&Scene> {
        self.navigator.current().filter(|_| self.open)
    }

    /// Index of the active scene in the opened list.
    pub fn active_index(&self) -> Option<usize> {
        self.navigator.current_index().filter(|_| self.open)
    }

    /// Marker load state of the active scene.
    pub fn marker_status(&self) -> MarkerStatus {
        self.markers.status()
    }

    /// Markers of the active scene.
    pub fn markers(&self) -> &MarkerResolver {
        &self.markers
    }

    /// Visibility cache (for inspection).
    pub fn visibility(&self) -> &VisibilityCache {
        &self.visibility
    }

    /// Current canvas → surface mapping.
    pub fn viewport(&self) -> &ViewportTransform {
        &self.viewport
    }

    /// Active notices.
    pub fn notices(&self) -> &[Notice] {
        self.notices.active()
    }

    /// Dismiss one notice early.
    pub fn dismiss_notice(&mut self, id: u64) {
        self.notices.dismiss(id);
    }

    /// `true` while fullscreen is held.
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Options the session was built with.
    pub fn opts(&self) -> &PreviewOpts {
        &self.opts
    }

    fn navigate(&mut self, result: PlayerResult<Selection>) -> PlayerResult<()> {
        if !self.open {
            return result.map(|_| ());
        }
        match result {
            Ok(sel) => {
                self.report_skipped(&sel);
                self.activate();
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "navigation found no playable scene");
                self.notices
                    .push(NoticeKind::NoPlayableScene, "no playable scene in that direction");
                Err(err)
            }
        }
    }

    /// Switch every derived component to the navigator's current scene.
    ///
    /// Markers are discarded before anything else can read them.
    fn activate(&mut self) {
        self.scheduler.stop();
        self.audio.stop(self.narration.as_mut());

        let Some(scene) = self.navigator.current() else {
            return;
        };
        self.markers.begin_load(&scene.id, self.source.as_mut());
        self.visibility.clear();

        if let Some(narration) = &scene.narration {
            self.narration.load(&narration.url);
        }
        let duration = resolve_duration(
            scene,
            self.narration.natural_duration(),
            self.opts.default_duration_secs,
        );
        self.clock.reset(duration);
        self.narration.seek(0.0);
        self.audio.reset();
        self.audio.apply_output(self.narration.as_mut());

        self.viewport = ViewportTransform::fit_with_fallback(
            scene.canvas(),
            self.surface,
            self.opts.fallback_scale,
        );
        tracing::debug!(scene = %scene.id, duration, "scene activated");

        let update = self.markers.poll(self.source.as_mut());
        self.handle_markers(update);
    }

    fn teardown(&mut self) {
        self.scheduler.stop();
        self.audio.stop(self.narration.as_mut());
        self.narration.seek(0.0);
        self.fullscreen = false;
        self.clock.reset(0.0);
        self.markers.clear();
        self.visibility.clear();
        self.notices.clear();
        self.navigator = SceneNavigator::default();
        self.open = false;
    }

    fn refit(&mut self) {
        let canvas = self
            .navigator
            .current()
            .map_or_else(|| AspectRatio::default().canvas(), Scene::canvas);
        self.viewport =
            ViewportTransform::fit_with_fallback(canvas, self.surface, self.opts.fallback_scale);
    }

    fn report_skipped(&mut self, sel: &Selection) {
        for skipped in &sel.skipped {
            self.notices.push(
                NoticeKind::ContentMissing,
                format!(
                    "scene '{}' skipped: {}",
                    skipped.scene_id,
                    skipped.reason.describe()
                ),
            );
        }
    }

    fn handle_markers(&mut self, update: MarkerUpdate) {
        if let MarkerUpdate::Failed(err) = update {
            self.notices.push(
                NoticeKind::MarkersUnavailable,
                format!("markers unavailable: {err}"),
            );
        }
    }

    fn handle_audio(&mut self, event: AudioEvent) {
        match event {
            AudioEvent::PlaybackFailed { error, will_retry } => {
                let suffix = if will_retry { ", retrying" } else { "" };
                self.notices.push(
                    NoticeKind::AudioFailed,
                    format!("narration playback failed{suffix}: {error}"),
                );
            }
            AudioEvent::Recovered => tracing::debug!("narration playback recovered"),
            AudioEvent::InSync | AudioEvent::Reseeked { .. } => {}
        }
    }
}

impl Drop for PreviewSession {
    fn drop(&mut self) {
        if self.open {
            self.teardown();
        }
    }
}
