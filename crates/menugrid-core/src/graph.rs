//! Proximity graph over grid line candidates.
//!
//! Each [`Segment`] becomes a node keyed by its id; two nodes are joined when
//! their corners nearly coincide (see [`Segment::is_adjacent`]). The graph is
//! only used to find the connected component that forms the grid and is
//! discarded afterwards.

use std::collections::{BTreeSet, HashMap};

use crate::segment::Segment;

/// Undirected simple graph of segments.
#[derive(Debug, Clone, Default)]
pub struct ProximityGraph {
    /// Nodes in insertion order.
    nodes: Vec<Segment>,
    /// Segment id → position in `nodes`.
    index: HashMap<usize, usize>,
    /// Neighbor positions for each node.
    adjacency: Vec<BTreeSet<usize>>,
}

impl ProximityGraph {
    /// Build the graph by comparing every pair of segments.
    ///
    /// Segment ids must be unique. The all-pairs pass is quadratic, which is
    /// fine for the few hundred lines a page carries.
    pub fn build(segments: &[Segment], tolerance: f64) -> Self {
        let n = segments.len();
        let mut index = HashMap::with_capacity(n);
        for (pos, segment) in segments.iter().enumerate() {
            debug_assert!(
                !index.contains_key(&segment.id),
                "duplicate segment id {}",
                segment.id
            );
            index.insert(segment.id, pos);
        }

        let mut adjacency = vec![BTreeSet::new(); n];
        for i in 0..n {
            for j in (i + 1)..n {
                if segments[i].is_adjacent(&segments[j], tolerance) {
                    adjacency[i].insert(j);
                    adjacency[j].insert(i);
                }
            }
        }

        Self {
            nodes: segments.to_vec(),
            index,
            adjacency,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(BTreeSet::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The segment stored under `id`.
    pub fn node(&self, id: usize) -> Option<&Segment> {
        self.index.get(&id).map(|&pos| &self.nodes[pos])
    }

    /// Ids of the nodes adjacent to `id`, in insertion order.
    pub fn neighbors(&self, id: usize) -> Vec<usize> {
        match self.index.get(&id) {
            Some(&pos) => self.adjacency[pos]
                .iter()
                .map(|&p| self.nodes[p].id)
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        match (self.index.get(&a), self.index.get(&b)) {
            (Some(&pa), Some(&pb)) => self.adjacency[pa].contains(&pb),
            _ => false,
        }
    }

    /// All connected components as lists of segment ids.
    ///
    /// Components are ordered by their earliest node in insertion order, and
    /// ids inside a component keep insertion order, so the result is
    /// deterministic for a given input.
    pub fn components(&self) -> Vec<Vec<usize>> {
        let n = self.nodes.len();
        let mut parent: Vec<usize> = (0..n).collect();

        fn find(parent: &mut [usize], mut i: usize) -> usize {
            while parent[i] != i {
                parent[i] = parent[parent[i]]; // path compression
                i = parent[i];
            }
            i
        }

        fn union(parent: &mut [usize], a: usize, b: usize) {
            let ra = find(parent, a);
            let rb = find(parent, b);
            if ra != rb {
                parent[rb] = ra;
            }
        }

        for (i, neighbors) in self.adjacency.iter().enumerate() {
            for &j in neighbors {
                if i < j {
                    union(&mut parent, i, j);
                }
            }
        }

        let mut group_of_root: HashMap<usize, usize> = HashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for i in 0..n {
            let root = find(&mut parent, i);
            let group = *group_of_root.entry(root).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[group].push(self.nodes[i].id);
        }
        groups
    }

    /// Ids of the component with the most nodes.
    ///
    /// On a size tie the component enumerated first by
    /// [`components`](ProximityGraph::components) wins. An empty graph
    /// yields an empty component.
    pub fn largest_component(&self) -> Vec<usize> {
        let mut largest: Vec<usize> = Vec::new();
        for component in self.components() {
            if component.len() > largest.len() {
                largest = component;
            }
        }
        largest
    }

    /// Resolve component ids back to their segments.
    pub fn segments_of(&self, ids: &[usize]) -> Vec<Segment> {
        ids.iter().filter_map(|&id| self.node(id)).copied().collect()
    }
}
