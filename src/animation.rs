//! Sprite keyframe sequences and playback timing.
//!
//! A [`KeyframeSequence`] is sampled at a fixed frame rate; each
//! keyframe holds a frame payload and a duration in sample frames. The
//! [`SequencePlayer`] converts wall-clock time into frame steps,
//! supporting looping, pausing, and reverse playback via a negative
//! speed. Rendering is the caller's concern: the player only reports
//! which payload to display.

/// One keyframe: a frame payload shown for `length` sample frames.
#[derive(Debug, Clone, Copy)]
pub struct Keyframe {
    /// Opaque handle to the displayed frame (sprite index, atlas id, ...).
    pub sprite: u32,
    /// Duration in sample frames. Always at least 1.
    pub length: u32,
    /// Sample-frame offset of this keyframe from the sequence start.
    offset: u32,
}

impl Keyframe {
    pub fn offset(&self) -> u32 {
        self.offset
    }
}

/// A fixed-rate keyframe sequence.
#[derive(Debug, Clone)]
pub struct KeyframeSequence {
    keyframes: Vec<Keyframe>,
    sample: u32,
    total_frame_count: u32,
}

impl KeyframeSequence {
    /// Build a sequence from `(sprite, length)` pairs sampled at
    /// `sample` frames per second.
    pub fn new(
        frames: impl IntoIterator<Item = (u32, u32)>,
        sample: u32,
    ) -> anyhow::Result<Self> {
        if sample == 0 {
            anyhow::bail!("sample rate must be at least 1");
        }

        let mut keyframes = Vec::new();
        let mut total = 0u32;
        for (sprite, length) in frames {
            if length == 0 {
                anyhow::bail!("keyframe length must be at least 1");
            }
            keyframes.push(Keyframe {
                sprite,
                length,
                offset: total,
            });
            total += length;
        }
        if keyframes.is_empty() {
            anyhow::bail!("keyframe sequence is empty");
        }

        Ok(Self {
            keyframes,
            sample,
            total_frame_count: total,
        })
    }

    /// Uniform-length sequence from sprite payloads.
    pub fn from_sprites(
        sprites: impl IntoIterator<Item = u32>,
        sample: u32,
        each_frame_length: u32,
    ) -> anyhow::Result<Self> {
        Self::new(
            sprites.into_iter().map(|s| (s, each_frame_length)),
            sample,
        )
    }

    pub fn sample(&self) -> u32 {
        self.sample
    }

    pub fn keyframe_count(&self) -> usize {
        self.keyframes.len()
    }

    pub fn total_frame_count(&self) -> u32 {
        self.total_frame_count
    }

    /// Seconds each sample frame is held for.
    pub fn frame_delta_time(&self) -> f32 {
        1.0 / self.sample as f32
    }

    /// Total duration of one playthrough in seconds.
    pub fn duration(&self) -> f32 {
        self.total_frame_count as f32 * self.frame_delta_time()
    }

    pub fn keyframe(&self, index: usize) -> Option<&Keyframe> {
        self.keyframes.get(index)
    }
}

/// Playback state of a [`SequencePlayer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    /// Rewound to the first keyframe, not yet playing.
    Prepare,
    Play,
    Pause,
    /// Reached the terminal keyframe with looping off.
    Finish,
}

/// Steps through a sequence in fixed sample-frame increments.
#[derive(Debug, Clone)]
pub struct SequencePlayer {
    sequence: KeyframeSequence,
    speed: f32,
    looping: bool,
    state: PlayState,
    cur_keyframe: usize,
    frame_counter: u32,
    timer: f32,
}

impl SequencePlayer {
    pub fn new(sequence: KeyframeSequence) -> Self {
        Self {
            sequence,
            speed: 1.0,
            looping: true,
            state: PlayState::Prepare,
            cur_keyframe: 0,
            frame_counter: 0,
            timer: 0.0,
        }
    }

    pub fn sequence(&self) -> &KeyframeSequence {
        &self.sequence
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == PlayState::Finish
    }

    /// Playback rate. Negative plays in reverse.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn looping(&self) -> bool {
        self.looping
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn current_keyframe_index(&self) -> usize {
        self.cur_keyframe
    }

    /// Payload of the keyframe currently displayed.
    pub fn current_sprite(&self) -> u32 {
        self.sequence.keyframes[self.cur_keyframe].sprite
    }

    /// Rewind to the first keyframe and stop.
    pub fn rewind(&mut self) {
        self.cur_keyframe = 0;
        self.frame_counter = 0;
        self.timer = 0.0;
        self.state = PlayState::Prepare;
    }

    /// Begin or resume playback.
    pub fn play(&mut self) {
        if matches!(self.state, PlayState::Prepare | PlayState::Pause) {
            self.state = PlayState::Play;
        }
    }

    /// Suspend playback, keeping the current frame.
    pub fn pause(&mut self) {
        if matches!(self.state, PlayState::Prepare | PlayState::Play) {
            self.state = PlayState::Pause;
        }
    }

    /// Jump to a keyframe, resetting the frame counter and timer.
    pub fn set_keyframe(&mut self, index: usize) -> bool {
        if index < self.sequence.keyframe_count() {
            self.cur_keyframe = index;
            self.frame_counter = 0;
            self.timer = 0.0;
            true
        } else {
            false
        }
    }

    /// Advance playback by `dt` seconds and return the sprite payload to
    /// display. Does nothing unless playing.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if self.state != PlayState::Play {
            return self.current_sprite();
        }

        let interval = self.sequence.frame_delta_time();

        // abs keeps reverse playback's negative timer comparable
        if self.timer.abs() >= interval {
            let skip = (self.timer / interval).round() as i32;
            self.frame_counter += skip.unsigned_abs();

            let dir: i32 = if skip >= 0 { 1 } else { -1 };
            self.timer -= skip as f32 * interval;

            loop {
                let length = self.sequence.keyframes[self.cur_keyframe].length;
                if self.frame_counter < length {
                    break;
                }

                let last_index = if dir > 0 {
                    self.sequence.keyframe_count() - 1
                } else {
                    0
                };
                if self.cur_keyframe == last_index && !self.looping {
                    self.state = PlayState::Finish;
                    break;
                }

                self.frame_counter -= length;
                self.cur_keyframe =
                    loop_index(self.cur_keyframe, self.sequence.keyframe_count(), dir);
            }
        }

        self.timer += self.speed * dt;
        self.current_sprite()
    }
}

/// Step an index with wrap-around in both directions.
fn loop_index(index: usize, count: usize, dir: i32) -> usize {
    (index as i32 + dir).rem_euclid(count as i32) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_frame_sequence() -> KeyframeSequence {
        // Sprites 10, 11, 12 at 10 fps, one sample frame each.
        KeyframeSequence::from_sprites([10, 11, 12], 10, 1).unwrap()
    }

    #[test]
    fn test_sequence_timing() {
        let seq = KeyframeSequence::new([(0, 2), (1, 3)], 24).unwrap();
        assert_eq!(seq.total_frame_count(), 5);
        assert_eq!(seq.keyframe_count(), 2);
        assert!((seq.frame_delta_time() - 1.0 / 24.0).abs() < 1e-6);
        assert!((seq.duration() - 5.0 / 24.0).abs() < 1e-6);
        assert_eq!(seq.keyframe(0).unwrap().offset(), 0);
        assert_eq!(seq.keyframe(1).unwrap().offset(), 2);
    }

    #[test]
    fn test_sequence_rejects_degenerate_input() {
        assert!(KeyframeSequence::new([], 24).is_err());
        assert!(KeyframeSequence::new([(0, 1)], 0).is_err());
        assert!(KeyframeSequence::new([(0, 0)], 24).is_err());
    }

    #[test]
    fn test_player_advances_through_frames() {
        let mut player = SequencePlayer::new(three_frame_sequence());
        player.play();

        // 10 fps: each frame lasts 0.1 s. The timer accumulates after
        // the frame check, so the first advance shows the first frame.
        assert_eq!(player.advance(0.1), 10);
        assert_eq!(player.advance(0.1), 11);
        assert_eq!(player.advance(0.1), 12);
    }

    #[test]
    fn test_player_loops() {
        let mut player = SequencePlayer::new(three_frame_sequence());
        player.play();

        for _ in 0..3 {
            player.advance(0.1);
        }
        assert_eq!(player.advance(0.1), 10);
        assert_eq!(player.state(), PlayState::Play);
    }

    #[test]
    fn test_player_finishes_without_loop() {
        let mut player = SequencePlayer::new(three_frame_sequence());
        player.set_looping(false);
        player.play();

        for _ in 0..8 {
            player.advance(0.1);
        }
        assert_eq!(player.state(), PlayState::Finish);
        assert_eq!(player.current_keyframe_index(), 2);
        assert!(player.is_finished());
    }

    #[test]
    fn test_player_pause_holds_frame() {
        let mut player = SequencePlayer::new(three_frame_sequence());
        player.play();
        player.advance(0.1);
        player.advance(0.1);
        player.pause();

        let held = player.current_sprite();
        assert_eq!(player.advance(1.0), held);
        assert_eq!(player.state(), PlayState::Pause);
    }

    #[test]
    fn test_player_skips_multiple_frames_on_large_dt() {
        let mut player = SequencePlayer::new(three_frame_sequence());
        player.play();

        player.advance(0.2);
        // Timer now holds two whole frame intervals: both are consumed
        // on the next advance.
        assert_eq!(player.advance(0.0), 12);
    }

    #[test]
    fn test_player_reverse_playback() {
        let mut player = SequencePlayer::new(three_frame_sequence());
        player.set_speed(-1.0);
        player.play();

        player.advance(0.1);
        // Negative timer steps keyframes backward, wrapping to the end.
        assert_eq!(player.advance(0.1), 12);
    }

    #[test]
    fn test_rewind_resets_state() {
        let mut player = SequencePlayer::new(three_frame_sequence());
        player.play();
        player.advance(0.1);
        player.advance(0.1);

        player.rewind();
        assert_eq!(player.state(), PlayState::Prepare);
        assert_eq!(player.current_keyframe_index(), 0);
        assert_eq!(player.current_sprite(), 10);
    }
}
