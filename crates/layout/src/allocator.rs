//! RegionAllocator - one region per player inside a horizontal band
//!
//! Players are kept in join order. Every join recomputes the whole band from
//! scratch: each seat gets the same width, seats are separated by a one-cell
//! gap, and a lone player never takes more than half the band.
//!
//! Leaving does not re-flow. The vacated columns stay empty until the next
//! join re-packs everyone.

use tracing::{debug, trace};

use crate::error::LayoutError;
use crate::region::{Region, SlotCoords};
use crate::types::{Player, PlayerId};

/// Splits a band into evenly sized, non-overlapping player regions.
#[derive(Debug, Clone)]
pub struct RegionAllocator {
    x_min: i32,
    y_min: i32,
    width: i32,
    height: i32,
    num_players: usize,
    /// Join order.
    players: Vec<(PlayerId, Region)>,
}

impl RegionAllocator {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x_min: x,
            y_min: y,
            width,
            height,
            num_players: 0,
            players: Vec::new(),
        }
    }

    /// The managed band.
    pub fn band(&self) -> Region {
        Region::new(self.x_min, self.y_min, self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.num_players
    }

    pub fn is_empty(&self) -> bool {
        self.num_players == 0
    }

    /// Seat width for `n` players: an equal share minus the gap, capped at half the band.
    pub fn seat_width(&self, n: usize) -> i32 {
        let n = i32::try_from(n.max(1)).unwrap_or(i32::MAX);
        (self.width / n - 1).min(self.width / 2)
    }

    /// Give `id` a region and re-flow every existing seat.
    pub fn add_player(&mut self, id: PlayerId) -> Result<&Region, LayoutError> {
        if self.players.iter().any(|(p, _)| *p == id) {
            return Err(LayoutError::DuplicatePlayer(id));
        }

        self.num_players += 1;
        let n = self.num_players;
        let new_w = self.seat_width(n);

        let mut x = self.x_min;
        for (_, region) in self.players.iter_mut() {
            region.resize(Some(x), Some(new_w));
            x += new_w + 1;
        }

        let seats_before = i32::try_from(n - 1).unwrap_or(i32::MAX);
        let new_x = self.x_min + (new_w + 1) * seats_before;
        self.players
            .push((id, Region::new(new_x, self.y_min, new_w, self.height)));

        debug!(player = %id, players = n, seat_width = new_w, "re-flowed player band");

        let (_, region) = &self.players[self.players.len() - 1];
        Ok(region)
    }

    /// Drop `id`'s region. Remaining seats keep their place.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<Region, LayoutError> {
        let idx = self
            .players
            .iter()
            .position(|(p, _)| *p == id)
            .ok_or(LayoutError::PlayerNotFound(id))?;
        let (_, region) = self.players.remove(idx);
        self.num_players = self.num_players.saturating_sub(1);
        debug!(player = %id, players = self.num_players, "released player region");
        Ok(region)
    }

    pub fn region(&self, id: PlayerId) -> Result<&Region, LayoutError> {
        self.players
            .iter()
            .find(|(p, _)| *p == id)
            .map(|(_, region)| region)
            .ok_or(LayoutError::PlayerNotFound(id))
    }

    /// Slot coordinates for `player` in its current region.
    pub fn coords(&self, player: &Player) -> Result<SlotCoords, LayoutError> {
        let region = self.region(player.id)?;
        trace!(player = %player.id, x = region.x, width = region.width, "region lookup");
        Ok(region.all_coords(player))
    }

    /// Seats in join order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &Region)> + '_ {
        self.players.iter().map(|(id, region)| (*id, region))
    }

    pub fn restart(&mut self) {
        self.num_players = 0;
        self.players.clear();
    }
}
