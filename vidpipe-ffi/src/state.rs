// SPDX-FileCopyrightText: 2026 Contributors to the vidpipe project.
// SPDX-License-Identifier: Apache-2.0

//! The process-wide player table.
//!
//! Handles handed to the host are positive `i32`s; zero is reserved so a
//! handle slot can double as "none" on the C side. The table itself is
//! behind a mutex, but players are fetched as `Arc` clones and driven with
//! the table unlocked — a long synchronous state change in one player must
//! not stall entry points addressing another.

use std::sync::{Arc, LazyLock, Mutex, MutexGuard};

use slab::Slab;
use vidpipe::Player;

use crate::Error;
use crate::ffi::Id;

static STATE: LazyLock<Mutex<State>> = LazyLock::new(|| Mutex::new(State::new()));

pub struct State {
    players: Slab<Arc<Player>>,

    /// The player currently designated to receive platform surface events.
    /// JNI surface callbacks carry no user data, so this is the explicit
    /// routing slot they go through.
    surface_consumer: Option<Id>,
}

impl State {
    fn new() -> Self {
        State {
            players: Slab::new(),
            surface_consumer: None,
        }
    }

    pub fn lock() -> MutexGuard<'static, State> {
        STATE.lock().unwrap()
    }

    pub fn insert(&mut self, player: Player) -> Result<Id, Error> {
        let key = self.players.insert(Arc::new(player));
        // Slab keys start at zero; shift by one so handles stay positive.
        i32::try_from(key + 1).map_err(|_| Error::InvalidHandle)
    }

    pub fn player(&self, id: Id) -> Result<Arc<Player>, Error> {
        let key = usize::try_from(id - 1).map_err(|_| Error::InvalidHandle)?;
        self.players.get(key).cloned().ok_or(Error::InvalidHandle)
    }

    pub fn remove(&mut self, id: Id) -> Result<Arc<Player>, Error> {
        let key = usize::try_from(id - 1).map_err(|_| Error::InvalidHandle)?;
        let player = self.players.try_remove(key).ok_or(Error::InvalidHandle)?;
        if self.surface_consumer == Some(id) {
            self.surface_consumer = None;
        }
        Ok(player)
    }

    pub fn attach_surface_consumer(&mut self, id: Id) -> Result<(), Error> {
        // Validate before routing surface events anywhere.
        self.player(id)?;
        self.surface_consumer = Some(id);
        Ok(())
    }

    // Only the Android JNI callbacks route through here.
    #[cfg_attr(not(target_os = "android"), allow(dead_code))]
    pub fn surface_consumer(&self) -> Result<Arc<Player>, Error> {
        let id = self.surface_consumer.ok_or(Error::NoSurfaceConsumer)?;
        self.player(id)
    }
}
