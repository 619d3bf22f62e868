use super::*;

impl Table {
    /// Advances the game by at most one state transition. Returns the event
    /// tag the caller should broadcast, if any.
    ///
    /// Player decisions never happen in here; `Acting` waits for
    /// `apply_hit`, `apply_stick` or a departure to move the state, and the
    /// pacing states wait for their scheduled transition to come due.
    pub fn tick(&mut self) -> Option<TableEvent> {
        match self.state {
            TableState::Waiting => {
                if !self.players.is_empty() {
                    self.new_round();
                }
                None
            }

            TableState::Starting => {
                self.try_transition(TableState::NextPlayer);
                Some(TableEvent::Starting)
            }

            TableState::NextPlayer => Some(self.advance_turn()),

            TableState::Acting => None,

            TableState::DealerReveal => {
                self.dealer.reveal_hand();
                tracing::info!("Dealer reveals a score of {}", self.dealer.score());
                self.schedule_dealer_step();
                Some(TableEvent::DealerReveal)
            }

            TableState::DealerTurn => {
                match self.dealer_hit() {
                    Ok(card) => {
                        tracing::info!("Dealer draws {}, score now {}", card, self.dealer.score());
                        self.schedule_dealer_step();
                    }
                    Err(e) => {
                        // Forced stand on whatever the dealer holds.
                        tracing::error!(
                            "Dealer cannot draw ({}), standing at {}",
                            e,
                            self.dealer.score()
                        );
                        self.schedule_after(TableState::Comparing, self.dealer_pacing_ms);
                        self.try_transition(TableState::Dealing);
                    }
                }
                Some(TableEvent::Dealing)
            }

            TableState::Comparing => {
                self.settle_round();
                self.schedule_after(TableState::Finished, self.dealer_pacing_ms);
                self.try_transition(TableState::Dealing);
                Some(TableEvent::Comparing)
            }

            TableState::Finished => {
                self.schedule_after(TableState::Waiting, self.restart_cooldown_ms);
                self.try_transition(TableState::Restarting);
                Some(TableEvent::Finished)
            }

            TableState::Dealing | TableState::Restarting => {
                self.fire_pending_if_due();
                None
            }
        }
    }

    /// Moves the turn pointer to the next seat, skipping departed players.
    /// Past the last seat the round enters the dealer phase.
    fn advance_turn(&mut self) -> TableEvent {
        let mut next = self.active_position.map_or(0, |pos| pos + 1);
        while next < self.players.len() && self.players[next].has_left() {
            next += 1;
        }

        if next >= self.players.len() {
            self.active_position = None;
            self.try_transition(TableState::DealerReveal);
        } else {
            self.active_position = Some(next);
            self.players[next].start_acting();
            tracing::info!("Turn of {} (seat {})", self.players[next].name, next);
            self.try_transition(TableState::Acting);
        }
        TableEvent::Turn
    }

    /// After a reveal or a draw: another draw below the stand score,
    /// settlement otherwise, either way behind a pacing pause.
    fn schedule_dealer_step(&mut self) {
        let target = if self.dealer.score() < DEALER_STAND_SCORE {
            TableState::DealerTurn
        } else {
            TableState::Comparing
        };
        self.schedule_after(target, self.dealer_pacing_ms);
        self.try_transition(TableState::Dealing);
    }

    /// Arms the single pacing transition for the current round.
    pub(crate) fn schedule_after(&mut self, target: TableState, delay_ms: u64) {
        self.pending = Some(ScheduledTransition {
            target,
            due_at_ms: current_timestamp_ms() + delay_ms,
            generation: self.generation,
        });
    }

    /// Applies the pending transition once due. A transition scheduled
    /// before a reset carries a stale generation and is discarded unfired.
    fn fire_pending_if_due(&mut self) {
        let Some(pending) = self.pending else {
            return;
        };
        if pending.generation != self.generation {
            tracing::debug!("Discarding stale transition to {:?}", pending.target);
            self.pending = None;
            return;
        }
        if current_timestamp_ms() >= pending.due_at_ms {
            self.pending = None;
            self.try_transition(pending.target);
        }
    }
}
