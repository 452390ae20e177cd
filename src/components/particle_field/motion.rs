//! Scalar inputs that drive the parallax.
//!
//! The progress offset follows the user through a paged sequence; the
//! entry/exit offset eases in when a screen becomes active and back out when
//! it leaves.

/// Default entry/exit animation length in seconds.
pub const TRANSITION_SECONDS: f64 = 0.45;

/// Map a page position to a progress offset in [-0.5, 0.5].
///
/// `position` may be fractional while a pager is mid-swipe. Sequences with
/// fewer than two pages have nowhere to move and report zero.
pub fn progress_offset(position: f64, total: usize) -> f64 {
	if total < 2 {
		return 0.0;
	}
	position / (total - 1) as f64 - 0.5
}

fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Eased animation of the entry/exit offset.
#[derive(Clone, Debug)]
pub struct EntryExitTransition {
	from: f64,
	target: f64,
	value: f64,
	elapsed: f64,
	duration: f64,
}

impl Default for EntryExitTransition {
	fn default() -> Self {
		Self::new(TRANSITION_SECONDS)
	}
}

impl EntryExitTransition {
	/// Transition at rest at zero, taking `duration` seconds per move.
	pub fn new(duration: f64) -> Self {
		Self {
			from: 0.0,
			target: 0.0,
			value: 0.0,
			elapsed: duration,
			duration,
		}
	}

	/// Start easing towards `magnitude`.
	pub fn enter(&mut self, magnitude: f64) {
		self.retarget(magnitude);
	}

	/// Start easing back to rest.
	pub fn exit(&mut self) {
		self.retarget(0.0);
	}

	fn retarget(&mut self, target: f64) {
		if target == self.target {
			return;
		}
		self.from = self.value;
		self.target = target;
		if self.duration > 0.0 {
			self.elapsed = 0.0;
		} else {
			self.value = target;
		}
	}

	/// Advance by `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		if dt <= 0.0 || self.is_settled() {
			return;
		}
		self.elapsed = (self.elapsed + dt).min(self.duration);
		let t = self.elapsed / self.duration;
		self.value = self.from + (self.target - self.from) * smooth_step(t);
	}

	/// Current entry/exit offset.
	pub fn value(&self) -> f64 {
		self.value
	}

	/// Value being eased towards.
	pub fn target(&self) -> f64 {
		self.target
	}

	/// Whether the target has been reached.
	pub fn is_settled(&self) -> bool {
		self.elapsed >= self.duration
	}
}
