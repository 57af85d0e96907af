//! Resource field holding every collectible token on the grid.

use monkey_tribe_core::{CellCoord, GridSize, ResourceKind, TokenSnapshot};
use rand::{seq::SliceRandom, Rng};

use crate::entities::random_cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Token {
    kind: ResourceKind,
    cell: CellCoord,
}

/// Pool of typed tokens placed on random grid cells.
///
/// Buildable tokens are replaced one-for-one when collected so the pool keeps
/// its size. Currency tokens are consumed without replacement.
#[derive(Debug)]
pub(crate) struct ResourceField {
    tokens: Vec<Token>,
    narrowed: bool,
}

impl ResourceField {
    pub(crate) fn new() -> Self {
        Self {
            tokens: Vec::new(),
            narrowed: false,
        }
    }

    /// Restricts future spawns to wood and stone while a shortage lasts.
    pub(crate) fn set_narrowed(&mut self, narrowed: bool) {
        self.narrowed = narrowed;
    }

    pub(crate) fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Number of tokens of the kind currently on the grid.
    pub(crate) fn count_of(&self, kind: ResourceKind) -> usize {
        self.tokens.iter().filter(|token| token.kind == kind).count()
    }

    /// Places a token of the kind on a random cell.
    pub(crate) fn spawn<R: Rng>(&mut self, kind: ResourceKind, rng: &mut R, grid: GridSize) {
        let cell = random_cell(rng, grid);
        self.tokens.push(Token { kind, cell });
    }

    /// Places a buildable token of a random kind on a random cell.
    pub(crate) fn spawn_random<R: Rng>(&mut self, rng: &mut R, grid: GridSize) {
        let kind = self.random_kind(rng);
        self.spawn(kind, rng, grid);
    }

    /// Places a token at an exact cell.
    #[cfg(test)]
    pub(crate) fn place(&mut self, kind: ResourceKind, cell: CellCoord) {
        self.tokens.push(Token { kind, cell });
    }

    fn random_kind<R: Rng>(&self, rng: &mut R) -> ResourceKind {
        let pool: &[ResourceKind] = if self.narrowed {
            &ResourceKind::SHORTAGE
        } else {
            &ResourceKind::BUILDABLE
        };
        pool.choose(rng).copied().unwrap_or(ResourceKind::Wood)
    }

    /// Kinds of every token lying in the cell, in placement order.
    pub(crate) fn kinds_at(&self, cell: CellCoord) -> Vec<ResourceKind> {
        self.tokens
            .iter()
            .filter(|token| token.cell == cell)
            .map(|token| token.kind)
            .collect()
    }

    /// Removes one token of the kind from the cell, reporting whether one existed.
    pub(crate) fn remove_one(&mut self, cell: CellCoord, kind: ResourceKind) -> bool {
        match self
            .tokens
            .iter()
            .position(|token| token.cell == cell && token.kind == kind)
        {
            Some(index) => {
                let _ = self.tokens.remove(index);
                true
            }
            None => false,
        }
    }

    /// Collects one token and spawns its random replacement elsewhere.
    pub(crate) fn collect_and_replace<R: Rng>(
        &mut self,
        cell: CellCoord,
        kind: ResourceKind,
        rng: &mut R,
        grid: GridSize,
    ) -> bool {
        if !self.remove_one(cell, kind) {
            return false;
        }
        self.spawn_random(rng, grid);
        true
    }

    /// Re-rolls every buildable token to wood or stone.
    pub(crate) fn reroll_for_shortage<R: Rng>(&mut self, rng: &mut R) {
        for token in self
            .tokens
            .iter_mut()
            .filter(|token| token.kind != ResourceKind::Currency)
        {
            token.kind = ResourceKind::SHORTAGE
                .choose(rng)
                .copied()
                .unwrap_or(ResourceKind::Wood);
        }
    }

    pub(crate) fn snapshots(&self) -> Vec<TokenSnapshot> {
        self.tokens
            .iter()
            .map(|token| TokenSnapshot {
                kind: token.kind,
                cell: token.cell,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn collection_keeps_field_size_constant() {
        let grid = GridSize::new(8, 8);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut field = ResourceField::new();
        field.place(ResourceKind::Wood, CellCoord::new(2, 2));
        for _ in 0..9 {
            field.spawn_random(&mut rng, grid);
        }

        assert!(field.collect_and_replace(CellCoord::new(2, 2), ResourceKind::Wood, &mut rng, grid));
        assert_eq!(field.len(), 10);
    }

    #[test]
    fn collecting_a_missing_token_changes_nothing() {
        let grid = GridSize::new(4, 4);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut field = ResourceField::new();
        field.place(ResourceKind::Stone, CellCoord::new(1, 1));

        assert!(!field.collect_and_replace(CellCoord::new(1, 1), ResourceKind::Wood, &mut rng, grid));
        assert_eq!(field.kinds_at(CellCoord::new(1, 1)), vec![ResourceKind::Stone]);
    }

    #[test]
    fn shortage_narrows_rerolls_and_spawns_but_spares_currency() {
        let grid = GridSize::new(6, 6);
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut field = ResourceField::new();
        for _ in 0..20 {
            field.place(ResourceKind::Food, CellCoord::new(0, 0));
        }
        field.place(ResourceKind::Currency, CellCoord::new(5, 5));

        field.set_narrowed(true);
        field.reroll_for_shortage(&mut rng);
        for _ in 0..20 {
            field.spawn_random(&mut rng, grid);
        }

        assert_eq!(field.count_of(ResourceKind::Food), 0);
        assert_eq!(field.count_of(ResourceKind::Currency), 1);
        assert_eq!(field.len(), 41);
    }
}
