//! Win detection.
//!
//! Each player's lines form an undirected graph over occupied cells: two
//! adjacent cells are linked when the boundary between them carries that
//! player's line. Every tile gives each player exactly two edges, so every
//! node has degree at most two and each component is either a path or a
//! cycle.
//!
//! Graphs are rebuilt from the board on every query.

use crate::board::{Board, Extents};
use crate::config::GameConfig;
use crate::types::{Cell, Direction, Player};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, instrument};

/// A line must span at least this many rows or columns to win by connection.
pub const MIN_CONNECTION_SPAN: u32 = 8;

/// Board axis crossed by a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Axis {
    /// West edge to east edge.
    Horizontal,
    /// North edge to south edge.
    Vertical,
}

impl Axis {
    /// The two board sides this axis connects.
    pub fn sides(self) -> (Direction, Direction) {
        match self {
            Axis::Horizontal => (Direction::West, Direction::East),
            Axis::Vertical => (Direction::North, Direction::South),
        }
    }

    fn span(self, extents: &Extents) -> u32 {
        match self {
            Axis::Horizontal => extents.width(),
            Axis::Vertical => extents.height(),
        }
    }

    fn on_side(self, side: Direction, extents: &Extents, cell: Cell) -> bool {
        match side {
            Direction::North => cell.y == extents.min_y,
            Direction::South => cell.y == extents.max_y,
            Direction::West => cell.x == extents.min_x,
            Direction::East => cell.x == extents.max_x,
        }
    }
}

/// How a player won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinKind {
    /// A line joining opposite sides of the board.
    Connection(Axis),
    /// A closed line.
    Loop,
}

/// One winning line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Win {
    /// Owner of the line.
    pub player: Player,
    /// Connection or loop.
    pub kind: WinKind,
    /// Cells along the line, in walking order.
    pub path: Vec<Cell>,
}

/// Adjacency list of one player's lines.
#[derive(Debug, Clone)]
pub struct PlayerGraph {
    player: Player,
    adjacency: HashMap<Cell, Vec<Cell>>,
}

impl PlayerGraph {
    /// Builds the graph of `player`'s lines on `board`.
    #[instrument(skip(board), fields(tiles = board.len()))]
    pub fn build(board: &Board, player: Player) -> Self {
        let mut adjacency = HashMap::with_capacity(board.len());
        for (cell, tile) in board.iter() {
            let links: Vec<Cell> = tile
                .edges(player)
                .into_iter()
                .filter_map(|dir| {
                    let other = cell.neighbour(dir);
                    let there = board.get(other)?;
                    (there.player_at(dir.opposite()) == player).then_some(other)
                })
                .collect();
            adjacency.insert(cell, links);
        }
        Self { player, adjacency }
    }

    /// Owner of the lines.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Cells linked to `cell`.
    pub fn neighbours(&self, cell: Cell) -> &[Cell] {
        self.adjacency.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of links at `cell`.
    pub fn degree(&self, cell: Cell) -> usize {
        self.neighbours(cell).len()
    }

    /// Shortest path from `from` to every cell reachable from it, as a
    /// parent map.
    fn search(&self, from: Cell) -> HashMap<Cell, Cell> {
        let mut parents = HashMap::new();
        let mut queue = VecDeque::from([from]);
        parents.insert(from, from);
        while let Some(cell) = queue.pop_front() {
            for next in self.neighbours(cell) {
                if !parents.contains_key(next) {
                    parents.insert(*next, cell);
                    queue.push_back(*next);
                }
            }
        }
        parents
    }

    /// Shortest path between two cells, both ends included.
    pub fn shortest_path(&self, from: Cell, to: Cell) -> Option<Vec<Cell>> {
        let parents = self.search(from);
        trace_back(&parents, from, to)
    }

    /// Walks every closed line in the graph.
    ///
    /// Each cell is examined at most once. A walk stops as soon as it meets
    /// a cell that is not of degree two or that an earlier walk already saw.
    pub fn loops(&self) -> Vec<Vec<Cell>> {
        let mut cells: Vec<Cell> = self.adjacency.keys().copied().collect();
        cells.sort();

        let mut seen: HashSet<Cell> = HashSet::new();
        let mut found = Vec::new();
        for start in cells {
            if !seen.insert(start) || self.degree(start) != 2 {
                continue;
            }
            let mut path = vec![start];
            let mut previous = start;
            let mut current = self.neighbours(start)[0];
            loop {
                if current == start {
                    found.push(path);
                    break;
                }
                if !seen.insert(current) || self.degree(current) != 2 {
                    break;
                }
                path.push(current);
                let links = self.neighbours(current);
                let next = if links[0] == previous { links[1] } else { links[0] };
                previous = current;
                current = next;
            }
        }
        found
    }
}

fn trace_back(parents: &HashMap<Cell, Cell>, from: Cell, to: Cell) -> Option<Vec<Cell>> {
    let mut cell = to;
    let mut path = vec![to];
    while cell != from {
        cell = *parents.get(&cell)?;
        path.push(cell);
    }
    path.reverse();
    Some(path)
}

/// First edge-to-edge line of `graph`'s player along `axis`, if any.
fn connection(board: &Board, graph: &PlayerGraph, axis: Axis) -> Option<Vec<Cell>> {
    let extents = board.extents()?;
    if axis.span(&extents) < MIN_CONNECTION_SPAN {
        return None;
    }
    let (near, far) = axis.sides();
    let exits = |side: Direction| -> Vec<Cell> {
        let mut cells: Vec<Cell> = board
            .iter()
            .filter(|(cell, tile)| {
                axis.on_side(side, &extents, *cell) && tile.player_at(side) == graph.player()
            })
            .map(|(cell, _)| cell)
            .collect();
        cells.sort();
        cells
    };

    let targets = exits(far);
    for source in exits(near) {
        let parents = graph.search(source);
        if let Some(path) = targets
            .iter()
            .find_map(|target| trace_back(&parents, source, *target))
        {
            return Some(path);
        }
    }
    None
}

/// Edge-to-edge connections for both players on both axes.
#[instrument(skip(board), fields(tiles = board.len()))]
pub fn connection_wins(board: &Board) -> Vec<Win> {
    let mut wins = Vec::new();
    for player in Player::ALL {
        let graph = PlayerGraph::build(board, player);
        for axis in [Axis::Horizontal, Axis::Vertical] {
            if let Some(path) = connection(board, &graph, axis) {
                debug!(%player, %axis, length = path.len(), "Connection found");
                wins.push(Win {
                    player,
                    kind: WinKind::Connection(axis),
                    path,
                });
            }
        }
    }
    wins
}

/// Closed loops for both players.
#[instrument(skip(board), fields(tiles = board.len()))]
pub fn loop_wins(board: &Board) -> Vec<Win> {
    let mut wins = Vec::new();
    for player in Player::ALL {
        for path in PlayerGraph::build(board, player).loops() {
            debug!(%player, length = path.len(), "Loop found");
            wins.push(Win {
                player,
                kind: WinKind::Loop,
                path,
            });
        }
    }
    wins
}

/// Every win on the board under the configured variant.
#[instrument(skip(board, config), fields(tiles = board.len()))]
pub fn evaluate(board: &Board, config: &GameConfig) -> Vec<Win> {
    let mut wins = loop_wins(board);
    if !*config.loop_variant() {
        wins.extend(connection_wins(board));
    }
    wins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tile;

    /// White ring through the 2x2 block at the origin.
    fn ring() -> Board {
        let mut board = Board::new();
        board.set(Cell::new(0, 0), Tile::D);
        board.set(Cell::new(1, 0), Tile::F);
        board.set(Cell::new(1, 1), Tile::C);
        board.set(Cell::new(0, 1), Tile::E);
        board
    }

    #[test]
    fn test_graph_degrees() {
        let graph = PlayerGraph::build(&ring(), Player::White);
        for (cell, _) in ring().iter() {
            assert_eq!(graph.degree(cell), 2);
        }
        let red = PlayerGraph::build(&ring(), Player::Red);
        for (cell, _) in ring().iter() {
            assert_eq!(red.degree(cell), 0);
        }
    }

    #[test]
    fn test_ring_is_one_loop() {
        let loops = PlayerGraph::build(&ring(), Player::White).loops();
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 4);
        assert!(loop_wins(&ring()).iter().all(|w| w.player == Player::White));
    }

    #[test]
    fn test_shortest_path() {
        let graph = PlayerGraph::build(&ring(), Player::White);
        let path = graph.shortest_path(Cell::new(0, 0), Cell::new(1, 1)).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.first(), Some(&Cell::new(0, 0)));
        assert_eq!(path.last(), Some(&Cell::new(1, 1)));
        assert!(graph.shortest_path(Cell::new(0, 0), Cell::new(9, 9)).is_none());
    }

    #[test]
    fn test_short_line_never_connects() {
        let mut board = Board::new();
        for x in 0..7 {
            board.set(Cell::new(x, 0), Tile::B);
        }
        assert!(connection_wins(&board).is_empty());
        board.set(Cell::new(7, 0), Tile::B);
        let wins = connection_wins(&board);
        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].kind, WinKind::Connection(Axis::Horizontal));
        assert_eq!(wins[0].path.len(), 8);
    }

    #[test]
    fn test_loop_variant_ignores_connections() {
        let mut board = Board::new();
        for x in 0..8 {
            board.set(Cell::new(x, 0), Tile::B);
        }
        assert_eq!(evaluate(&board, &GameConfig::standard()).len(), 1);
        assert!(evaluate(&board, &GameConfig::loop_trax()).is_empty());
    }
}
