/*
animation.rs

Copyright 2025 Hervé Quatremain

This file is part of Mazewalk.

Mazewalk is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Mazewalk is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Mazewalk. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Replay a solver run at animation speed.
//!
//! The run is moved to a worker thread that pauses after each event, as configured with
//! [`AnimationDelays`], and sends the events to the caller over a bounded channel. The caller
//! applies the events to the engine and redraws the maze in its own loop.
//!
//! Before sending an event, the worker compares the run token with the engine run counter. When
//! a new maze has been generated or a new run has started, the worker stops.

use async_channel::{Receiver, Sender};
use log::debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

use crate::config::AnimationDelays;
use crate::engine::{MazeEngine, RunToken, SolveRun};
use crate::solver::algorithm::Algorithm;
use crate::solver::search::VisitEvent;

/// [`Animator`] object.
pub struct Animator {
    /// Engine run counter.
    runs: Arc<AtomicU64>,

    delays: AnimationDelays,
}

impl Animator {
    /// Create an [`Animator`] object for the runs of the given engine.
    pub fn new(engine: &MazeEngine, delays: AnimationDelays) -> Self {
        Self {
            runs: engine.run_counter(),
            delays,
        }
    }

    /// Start replaying the run and return the receiving end of the event channel.
    ///
    /// The channel closes after the terminal event, or as soon as the run is abandoned.
    pub fn play(&self, run: SolveRun) -> Receiver<(RunToken, VisitEvent)> {
        let (sender, receiver) = async_channel::bounded::<(RunToken, VisitEvent)>(1);
        let runs: Arc<AtomicU64> = Arc::clone(&self.runs);
        let delays: AnimationDelays = self.delays.clone();

        thread::spawn(move || Self::replay(run, &runs, &delays, &sender));
        receiver
    }

    fn replay(
        run: SolveRun,
        runs: &AtomicU64,
        delays: &AnimationDelays,
        sender: &Sender<(RunToken, VisitEvent)>,
    ) {
        let token: RunToken = run.token();
        let algorithm: Algorithm = run.algorithm();

        for event in run {
            if runs.load(Ordering::SeqCst) != token.value() {
                debug!("Run {token} abandoned, animation stopped");
                return;
            }
            let pause: Duration = delays.delay(algorithm, &event);
            let last: bool = event.is_terminal();
            if sender.send_blocking((token, event)).is_err() {
                debug!("Run {token}: receiver closed, animation stopped");
                return;
            }
            if last {
                break;
            }
            if !pause.is_zero() {
                thread::sleep(pause);
            }
        }
        debug!("Run {token}: animation completed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MazeConfig;
    use crate::engine::SolveStatus;
    use crate::generator::cell::Coord;

    fn engine(seed: u64) -> MazeEngine {
        let mut config: MazeConfig = MazeConfig::with_size(20, 20);
        config.seed = Some(seed);
        MazeEngine::new(config).expect("valid configuration")
    }

    #[test]
    fn replay_reaches_the_solution() {
        let mut engine: MazeEngine = engine(31);
        let animator: Animator = Animator::new(&engine, AnimationDelays::none());
        let receiver = animator.play(engine.solve(Algorithm::BfsParallel).expect("valid run"));

        let mut last: Option<VisitEvent> = None;
        while let Ok((token, event)) = receiver.recv_blocking() {
            assert!(engine.apply(token, &event));
            last = Some(event);
        }
        assert!(matches!(last, Some(VisitEvent::SolutionFound(_))));
        assert_eq!(engine.status(), SolveStatus::Solved);
        let expected: Option<usize> = engine.grid().distance(Coord::new(0, 0), Coord::new(19, 19));
        assert_eq!(engine.solution().map(|p| p.num_edges()), expected);
    }

    #[test]
    fn new_maze_stops_the_replay() {
        let mut engine: MazeEngine = engine(32);
        let total: usize = engine.solve(Algorithm::Bfs).expect("valid run").count();

        let animator: Animator = Animator::new(&engine, AnimationDelays::none());
        let receiver = animator.play(engine.solve(Algorithm::Bfs).expect("valid run"));
        let (token, first) = receiver.recv_blocking().expect("first event");
        assert!(engine.apply(token, &first));

        engine.generate(Some(33)).expect("valid size");

        // One event can wait in the channel and another one in the worker
        let mut remaining: usize = 0;
        while let Ok((token, event)) = receiver.recv_blocking() {
            assert!(!engine.apply(token, &event));
            remaining += 1;
        }
        assert!(remaining <= 2);
        assert!(remaining + 1 < total);
        assert_eq!(engine.status(), SolveStatus::Idle);
    }

    #[test]
    fn dropped_receiver_stops_the_worker() {
        let mut engine: MazeEngine = engine(34);
        let animator: Animator = Animator::new(&engine, AnimationDelays::none());
        let receiver = animator.play(engine.solve(Algorithm::Dfs).expect("valid run"));
        assert!(receiver.recv_blocking().is_ok());
        drop(receiver);
        // The worker ends on its next send; the engine run stays active.
        assert_eq!(engine.status(), SolveStatus::Solving);
    }
}
