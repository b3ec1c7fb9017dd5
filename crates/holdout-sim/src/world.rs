//! World state: every entity collection and counter the simulation owns.
//!
//! Pure data plus lookups. Systems mutate it through plain field access;
//! presentation only ever sees snapshots.

use holdout_core::components::*;
use holdout_core::enums::StructureKind;
use holdout_core::types::GridCell;

use crate::systems::wave_spawner::WaveController;

/// Player-built structures, one collection per kind.
///
/// At most one structure of any kind occupies a grid cell.
#[derive(Debug, Clone, Default)]
pub struct Structures {
    pub walls: Vec<Wall>,
    pub generators: Vec<Generator>,
    pub turrets: Vec<Turret>,
}

/// Borrowed view of one structure, whatever its kind.
#[derive(Debug, Clone, Copy)]
pub enum StructureRef<'a> {
    Wall(&'a Wall),
    Generator(&'a Generator),
    Turret(&'a Turret),
}

/// The whole simulation state.
#[derive(Debug, Clone)]
pub struct World {
    pub player: Player,
    pub resource_nodes: Vec<ResourceNode>,
    pub structures: Structures,
    pub zombies: Vec<Zombie>,
    pub projectiles: Vec<Projectile>,
    pub waves: WaveController,
}

impl World {
    /// An empty world around the given player.
    pub fn new(player: Player) -> Self {
        Self {
            player,
            resource_nodes: Vec::new(),
            structures: Structures::default(),
            zombies: Vec::new(),
            projectiles: Vec::new(),
            waves: WaveController::default(),
        }
    }

    /// Resource nodes that can still be gathered.
    pub fn live_resource_nodes(&self) -> impl Iterator<Item = &ResourceNode> {
        self.resource_nodes.iter().filter(|node| !node.taken)
    }

    /// Zombies with hp left.
    pub fn living_zombie_count(&self) -> usize {
        self.zombies.iter().filter(|z| z.hp > 0.0).count()
    }
}

impl Structures {
    /// Walls, then generators, then turrets.
    pub fn iter(&self) -> impl Iterator<Item = StructureRef<'_>> {
        self.walls
            .iter()
            .map(StructureRef::Wall)
            .chain(self.generators.iter().map(StructureRef::Generator))
            .chain(self.turrets.iter().map(StructureRef::Turret))
    }

    pub fn len(&self) -> usize {
        self.walls.len() + self.generators.len() + self.turrets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn at(&self, cell: GridCell) -> Option<StructureRef<'_>> {
        self.iter().find(|s| s.cell() == cell)
    }

    pub fn is_occupied(&self, cell: GridCell) -> bool {
        self.at(cell).is_some()
    }

    pub fn turret_at(&self, cell: GridCell) -> Option<&Turret> {
        self.turrets.iter().find(|t| t.cell == cell)
    }

    pub fn turret_at_mut(&mut self, cell: GridCell) -> Option<&mut Turret> {
        self.turrets.iter_mut().find(|t| t.cell == cell)
    }

    /// Cells of every structure in scan order, written into a reusable buffer.
    pub fn collect_cells(&self, out: &mut Vec<GridCell>) {
        out.clear();
        out.extend(self.iter().map(|s| s.cell()));
    }

    /// Apply damage to the structure on `cell`, removing it at zero hp.
    ///
    /// Returns the kind of structure destroyed, if any.
    pub fn damage_at(&mut self, cell: GridCell, amount: f64) -> Option<StructureKind> {
        let kind = {
            let (hp, kind) = self.hp_mut(cell)?;
            *hp -= amount;
            if *hp > 0.0 {
                return None;
            }
            kind
        };
        self.remove_at(cell);
        Some(kind)
    }

    /// Remove whatever stands on `cell`.
    pub fn remove_at(&mut self, cell: GridCell) -> Option<StructureKind> {
        if let Some(idx) = self.walls.iter().position(|w| w.cell == cell) {
            self.walls.remove(idx);
            return Some(StructureKind::Wall);
        }
        if let Some(idx) = self.generators.iter().position(|g| g.cell == cell) {
            self.generators.remove(idx);
            return Some(StructureKind::Generator);
        }
        if let Some(idx) = self.turrets.iter().position(|t| t.cell == cell) {
            let turret = self.turrets.remove(idx);
            return Some(StructureKind::Turret(turret.weapon.kind()));
        }
        None
    }

    fn hp_mut(&mut self, cell: GridCell) -> Option<(&mut f64, StructureKind)> {
        if let Some(wall) = self.walls.iter_mut().find(|w| w.cell == cell) {
            return Some((&mut wall.hp, StructureKind::Wall));
        }
        if let Some(generator) = self.generators.iter_mut().find(|g| g.cell == cell) {
            return Some((&mut generator.hp, StructureKind::Generator));
        }
        self.turrets
            .iter_mut()
            .find(|t| t.cell == cell)
            .map(|t| {
                let kind = StructureKind::Turret(t.weapon.kind());
                (&mut t.hp, kind)
            })
    }
}

impl StructureRef<'_> {
    pub fn cell(&self) -> GridCell {
        match self {
            StructureRef::Wall(w) => w.cell,
            StructureRef::Generator(g) => g.cell,
            StructureRef::Turret(t) => t.cell,
        }
    }

    pub fn hp(&self) -> f64 {
        match self {
            StructureRef::Wall(w) => w.hp,
            StructureRef::Generator(g) => g.hp,
            StructureRef::Turret(t) => t.hp,
        }
    }

    pub fn kind(&self) -> StructureKind {
        match self {
            StructureRef::Wall(_) => StructureKind::Wall,
            StructureRef::Generator(_) => StructureKind::Generator,
            StructureRef::Turret(t) => StructureKind::Turret(t.weapon.kind()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdout_core::constants::STRUCTURE_HP;

    fn wall(col: i32, row: i32) -> Wall {
        Wall {
            cell: GridCell::new(col, row),
            hp: STRUCTURE_HP,
        }
    }

    fn generator(col: i32, row: i32) -> Generator {
        Generator {
            cell: GridCell::new(col, row),
            hp: STRUCTURE_HP,
            production: 0.5,
        }
    }

    #[test]
    fn scan_order_is_walls_generators_turrets() {
        let mut structures = Structures::default();
        structures.generators.push(generator(0, 0));
        structures.walls.push(wall(1, 0));
        structures.walls.push(wall(2, 0));

        let kinds: Vec<StructureKind> = structures.iter().map(|s| s.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                StructureKind::Wall,
                StructureKind::Wall,
                StructureKind::Generator
            ]
        );
        assert_eq!(structures.len(), 3);
    }

    #[test]
    fn occupancy_spans_all_kinds() {
        let mut structures = Structures::default();
        structures.generators.push(generator(3, 4));
        assert!(structures.is_occupied(GridCell::new(3, 4)));
        assert!(!structures.is_occupied(GridCell::new(4, 3)));
        assert_eq!(
            structures.at(GridCell::new(3, 4)).map(|s| s.kind()),
            Some(StructureKind::Generator)
        );
    }

    #[test]
    fn damage_removes_at_zero_hp() {
        let mut structures = Structures::default();
        structures.walls.push(wall(0, 0));
        structures.walls.push(wall(1, 0));

        assert_eq!(structures.damage_at(GridCell::new(0, 0), 60.0), None);
        assert_eq!(
            structures.damage_at(GridCell::new(0, 0), 40.0),
            Some(StructureKind::Wall)
        );
        assert_eq!(structures.walls.len(), 1);
        assert_eq!(structures.walls[0].cell, GridCell::new(1, 0));
    }

    #[test]
    fn damage_on_empty_cell_is_noop() {
        let mut structures = Structures::default();
        assert_eq!(structures.damage_at(GridCell::new(9, 9), 500.0), None);
        assert_eq!(structures.remove_at(GridCell::new(9, 9)), None);
    }
}
