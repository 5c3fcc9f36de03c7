//! Deterministic weighted shortest paths for hostile movement.
//! This module exists so chase paths come from one cost model shared by every hostile.
//! It does not own the decision of when a path is recomputed or followed.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use super::*;

const CARDINAL_COST: u32 = 2;
const DIAGONAL_COST: u32 = 3;
/// Extra cost for a cell held by a blocking entity. Keeps it passable so hostiles route
/// around each other instead of queueing in corridors.
const OCCUPIED_PENALTY: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    y: i32,
    x: i32,
}

/// Per-cell entry cost. Zero means impassable.
struct CostGrid {
    width: usize,
    costs: Vec<u32>,
}

impl CostGrid {
    fn build(world: &World) -> Self {
        let map = &world.map;
        let mut costs: Vec<u32> =
            map.tiles.iter().map(|tile| u32::from(tile.is_walkable())).collect();
        for actor in world.actors.values() {
            if !actor.blocks_movement || !map.in_bounds(actor.pos) {
                continue;
            }
            let idx = (actor.pos.y as usize) * map.width + (actor.pos.x as usize);
            if costs[idx] > 0 {
                costs[idx] += OCCUPIED_PENALTY;
            }
        }
        Self { width: map.width, costs }
    }

    fn cost(&self, map: &Map, pos: Pos) -> u32 {
        if !map.in_bounds(pos) {
            return 0;
        }
        self.costs[(pos.y as usize) * self.width + (pos.x as usize)]
    }
}

/// Cheapest 8-connected route from `start` to `goal`, excluding `start` and including `goal`.
/// Empty when `goal` is unreachable or equal to `start`.
pub fn path_to(world: &World, start: Pos, goal: Pos) -> VecDeque<Pos> {
    let map = &world.map;
    if start == goal || !map.in_bounds(start) || !map.is_walkable(goal) {
        return VecDeque::new();
    }
    let grid = CostGrid::build(world);

    let mut open_set = BTreeSet::new();
    let mut g_score = BTreeMap::new();
    let mut came_from = BTreeMap::new();
    let h = octile(start, goal);
    open_set.insert(OpenNode { f: h, h, y: start.y, x: start.x });
    g_score.insert(start, 0u32);

    while let Some(curr) = open_set.pop_first() {
        let p = Pos { y: curr.y, x: curr.x };
        let cur_g = *g_score.get(&p).expect("open node must have g-score");
        if curr.f - curr.h > cur_g {
            continue;
        }
        if p == goal {
            return reconstruct_path(&came_from, start, goal);
        }
        for (dx, dy) in DIRECTIONS {
            let n = p.shift(dx, dy);
            let tile_cost = grid.cost(map, n);
            if tile_cost == 0 {
                continue;
            }
            let step = if dx != 0 && dy != 0 { DIAGONAL_COST } else { CARDINAL_COST };
            let tg = cur_g + tile_cost * step;
            if tg < *g_score.get(&n).unwrap_or(&u32::MAX) {
                came_from.insert(n, p);
                g_score.insert(n, tg);
                let h = octile(n, goal);
                open_set.insert(OpenNode { f: tg + h, h, y: n.y, x: n.x });
            }
        }
    }
    VecDeque::new()
}

fn reconstruct_path(came: &BTreeMap<Pos, Pos>, start: Pos, goal: Pos) -> VecDeque<Pos> {
    let mut p = goal;
    let mut result = VecDeque::from([p]);
    while let Some(prev) = came.get(&p).copied() {
        if prev == start {
            break;
        }
        result.push_front(prev);
        p = prev;
    }
    result
}

/// Lower bound on route cost when every tile costs one.
fn octile(a: Pos, b: Pos) -> u32 {
    let dx = a.x.abs_diff(b.x);
    let dy = a.y.abs_diff(b.y);
    CARDINAL_COST * dx.max(dy) + (DIAGONAL_COST - CARDINAL_COST) * dx.min(dy)
}
