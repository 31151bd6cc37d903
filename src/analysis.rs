use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::Bfs;
use std::fmt;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::grid::Grid;
use crate::units::{EdgesCount, NodesCount};
use crate::utils::{fnv_hashset, FnvHashSet};

/// The passages of a maze as an undirected graph.
///
/// Node `i` is the cell at row major index `i`. There is one edge per open internal wall pair.
/// Openings in the outer border are not edges.
pub fn passage_graph(grid: &Grid) -> UnGraph<Cartesian2DCoordinate, CompassPrimary> {
    let nodes = grid.size();
    let mut graph = UnGraph::with_capacity(nodes, nodes.saturating_sub(1));
    for coord in grid.iter() {
        let _ = graph.add_node(coord);
    }

    // Only look east and south so each wall pair is seen once.
    for (index, coord) in grid.iter().enumerate() {
        for &direction in &[CompassPrimary::East, CompassPrimary::South] {
            if !grid.is_open(coord, direction) {
                continue;
            }
            let neighbour_index = grid.neighbour_at_direction(coord, direction)
                .ok()
                .and_then(|neighbour| grid.grid_coordinate_to_index(neighbour));
            if let Some(neighbour_index) = neighbour_index {
                let _ = graph.add_edge(NodeIndex::new(index),
                                       NodeIndex::new(neighbour_index),
                                       direction);
            }
        }
    }
    graph
}

/// The number of open internal wall pairs.
pub fn passages_count(grid: &Grid) -> EdgesCount {
    EdgesCount(passage_graph(grid).edge_count())
}

/// The number of separate groups of cells that cannot reach each other.
pub fn regions_count(grid: &Grid) -> usize {
    connected_components(&passage_graph(grid))
}

pub fn is_fully_connected(grid: &Grid) -> bool {
    regions_count(grid) == 1
}

/// Connected with exactly one route between any two cells.
pub fn is_perfect(grid: &Grid) -> bool {
    let graph = passage_graph(grid);
    connected_components(&graph) == 1 && graph.edge_count() == graph.node_count() - 1
}

/// Independent cycles in the passage graph, i.e. how many passages more than a spanning forest needs.
pub fn cycles_count(grid: &Grid) -> usize {
    let graph = passage_graph(grid);
    (graph.edge_count() + connected_components(&graph)).saturating_sub(graph.node_count())
}

/// Every cell reachable from `from` through open walls, `from` included.
/// None if `from` is not on the grid.
pub fn reachable_cells(grid: &Grid,
                       from: Cartesian2DCoordinate)
                       -> Option<FnvHashSet<Cartesian2DCoordinate>> {
    let start_index = grid.grid_coordinate_to_index(from)?;
    let graph = passage_graph(grid);
    let mut reachable = fnv_hashset(grid.size());
    let mut bfs = Bfs::new(&graph, NodeIndex::new(start_index));
    while let Some(node) = bfs.next(&graph) {
        reachable.insert(graph[node]);
    }
    Some(reachable)
}

/// Open walls on the outer border, with the side of the cell they are on.
pub fn boundary_openings(grid: &Grid) -> Vec<(Cartesian2DCoordinate, CompassPrimary)> {
    grid.iter()
        .flat_map(|coord| CompassPrimary::ALL.iter().map(move |&direction| (coord, direction)))
        .filter(|&(coord, direction)| {
            grid.is_open(coord, direction) && grid.neighbour_at_direction(coord, direction).is_err()
        })
        .collect()
}

/// Headline numbers for a maze.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct MazeSummary {
    pub cells: NodesCount,
    pub passages: EdgesCount,
    pub regions: usize,
    pub cycles: usize,
    pub border_openings: usize,
}

impl MazeSummary {
    pub fn of(grid: &Grid) -> MazeSummary {
        let graph = passage_graph(grid);
        let regions = connected_components(&graph);
        MazeSummary {
            cells: NodesCount(graph.node_count()),
            passages: EdgesCount(graph.edge_count()),
            regions,
            cycles: (graph.edge_count() + regions).saturating_sub(graph.node_count()),
            border_openings: boundary_openings(grid).len(),
        }
    }

    pub fn is_perfect(&self) -> bool {
        self.regions == 1 && self.cycles == 0
    }
}

impl fmt::Display for MazeSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (NodesCount(cells), EdgesCount(passages)) = (self.cells, self.passages);
        write!(f,
               "{} cells, {} passages, {} region(s), {} loop(s), {} border opening(s)",
               cells,
               passages,
               self.regions,
               self.cycles,
               self.border_openings)
    }
}


#[cfg(test)]
mod tests {

    use itertools::Itertools;

    use super::*;
    use crate::units::{Height, Width};

    fn grid(w: usize, h: usize) -> Grid {
        Grid::new(Width(w), Height(h)).expect("invalid grid dimensions")
    }

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    #[test]
    fn fresh_grid_has_no_passages() {
        let g = grid(3, 2);
        assert_eq!(passages_count(&g), EdgesCount(0));
        assert_eq!(regions_count(&g), 6);
        assert!(!is_fully_connected(&g));
        assert!(!is_perfect(&g));
        assert_eq!(cycles_count(&g), 0);
        assert!(boundary_openings(&g).is_empty());
    }

    #[test]
    fn single_cell_is_perfect() {
        let g = grid(1, 1);
        assert!(is_fully_connected(&g));
        assert!(is_perfect(&g));
    }

    #[test]
    fn square_of_passages_has_one_cycle() {
        let mut g = grid(2, 2);
        g.remove_wall_between(gc(0, 0), gc(1, 0)).unwrap();
        g.remove_wall_between(gc(1, 0), gc(1, 1)).unwrap();
        g.remove_wall_between(gc(1, 1), gc(0, 1)).unwrap();
        assert!(is_perfect(&g));
        assert_eq!(cycles_count(&g), 0);

        g.remove_wall_between(gc(0, 1), gc(0, 0)).unwrap();
        assert_eq!(passages_count(&g), EdgesCount(4));
        assert!(is_fully_connected(&g));
        assert!(!is_perfect(&g));
        assert_eq!(cycles_count(&g), 1);
    }

    #[test]
    fn graph_edges_follow_open_walls() {
        let mut g = grid(3, 1);
        g.remove_wall_between(gc(1, 0), gc(2, 0)).unwrap();
        let graph = passage_graph(&g);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.find_edge(NodeIndex::new(1), NodeIndex::new(2)).is_some());
        assert!(graph.find_edge(NodeIndex::new(0), NodeIndex::new(1)).is_none());
        assert_eq!(graph[NodeIndex::new(2)], gc(2, 0));
    }

    #[test]
    fn reachability_stops_at_walls() {
        let mut g = grid(3, 2);
        g.remove_wall_between(gc(0, 0), gc(1, 0)).unwrap();
        g.remove_wall_between(gc(1, 0), gc(1, 1)).unwrap();

        let reachable = reachable_cells(&g, gc(0, 0)).unwrap();
        let sorted = reachable.into_iter().sorted().collect::<Vec<_>>();
        assert_eq!(sorted, vec![gc(0, 0), gc(1, 0), gc(1, 1)]);

        let alone = reachable_cells(&g, gc(2, 1)).unwrap();
        assert_eq!(alone.len(), 1);
        assert!(reachable_cells(&g, gc(3, 0)).is_none());
        assert_eq!(regions_count(&g), 4);
    }

    #[test]
    fn border_openings_are_listed() {
        let mut g = grid(2, 2);
        g.open_outer_wall(gc(0, 0), CompassPrimary::West).unwrap();
        g.open_outer_wall(gc(1, 1), CompassPrimary::South).unwrap();
        // Interior direction, so it joins two cells rather than opening the border.
        g.open_outer_wall(gc(0, 0), CompassPrimary::East).unwrap();

        let openings = boundary_openings(&g);
        assert_eq!(openings,
                   vec![(gc(0, 0), CompassPrimary::West), (gc(1, 1), CompassPrimary::South)]);
        assert_eq!(passages_count(&g), EdgesCount(1));
    }

    #[test]
    fn summary_of_a_corridor() {
        let mut g = grid(4, 1);
        for x in 1..4 {
            g.remove_wall_between(gc(x - 1, 0), gc(x, 0)).unwrap();
        }
        g.open_outer_wall(gc(0, 0), CompassPrimary::West).unwrap();
        g.open_outer_wall(gc(3, 0), CompassPrimary::East).unwrap();

        let summary = MazeSummary::of(&g);
        assert_eq!(summary,
                   MazeSummary {
                       cells: NodesCount(4),
                       passages: EdgesCount(3),
                       regions: 1,
                       cycles: 0,
                       border_openings: 2,
                   });
        assert!(summary.is_perfect());
        assert_eq!(summary.to_string(),
                   "4 cells, 3 passages, 1 region(s), 0 loop(s), 2 border opening(s)");
    }
}
