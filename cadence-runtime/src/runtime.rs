// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{runner::Runner, timer::TimerService};

/// Binds a timer service to the runner type its fired callbacks hand work to.
pub trait Runtime: 'static {
    type Timer: TimerService;
    type Runner: Runner;
}
