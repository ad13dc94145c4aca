//! Tarjan's strongly connected components over a graph of dense indices.

use std::cmp;

use bit_vec::BitVec;

const UNVISITED: usize = usize::MAX;

struct SccMutState {
    count: usize, // Index
    index: Vec<usize>, // StateRef -> Index
    lowlink: Vec<usize>, // StateRef -> Index
    on_stack: BitVec, // StateRef -> in scc_stack
    scc_stack: Vec<usize>, // Stack<StateRef>
    sccs: Vec<Vec<usize>>, // Stack<Set<StateRef>> the SCCs in reverse topo order
}

impl SccMutState {
    fn new(states: usize) -> Self {
        SccMutState {
            count: 0,
            index: vec![UNVISITED; states],
            lowlink: vec![UNVISITED; states],
            on_stack: BitVec::from_elem(states, false),
            scc_stack: Vec::new(),
            sccs: Vec::new(),
        }
    }

    #[inline]
    fn visited(&self, st_ref: usize) -> bool {
        self.index[st_ref] != UNVISITED
    }

    #[inline]
    fn scc_seed(&self, st_ref: usize) -> bool {
        self.index[st_ref] == self.lowlink[st_ref]
    }

    fn init(&mut self, st_ref: usize) {
        self.index[st_ref] = self.count;
        self.lowlink[st_ref] = self.count;
        self.count += 1;
        self.on_stack.set(st_ref, true);
        self.scc_stack.push(st_ref);
    }

    fn update(&mut self, from: usize, lowlink: usize) {
        self.lowlink[from] = cmp::min(self.lowlink[from], lowlink);
    }

    fn construct_scc(&mut self, from: usize) {
        if !self.scc_seed(from) {
            return;
        }
        let mut scc = Vec::new();
        while let Some(st_ref) = self.scc_stack.pop() {
            self.on_stack.set(st_ref, false);
            scc.push(st_ref);
            if st_ref == from {
                break;
            }
        }
        self.sccs.push(scc);
    }

    /// Iterative depth-first walk, the call stack holds `(StateRef, next edge)`.
    fn visit(&mut self, graph: &[Vec<usize>], root: usize) {
        self.init(root);
        let mut call_stack = vec![(root, 0)];
        while let Some(frame) = call_stack.last_mut() {
            let from = frame.0;
            let next = graph[from].get(frame.1).cloned();
            frame.1 += 1;
            match next {
                Some(to) if !self.visited(to) => {
                    self.init(to);
                    call_stack.push((to, 0));
                }
                Some(to) => {
                    if self.on_stack[to] {
                        let index = self.index[to];
                        self.update(from, index);
                    }
                }
                None => {
                    call_stack.pop();
                    if let Some(&(parent, _)) = call_stack.last() {
                        let lowlink = self.lowlink[from];
                        self.update(parent, lowlink);
                    }
                    self.construct_scc(from);
                }
            }
        }
    }
}

/// The SCCs of `graph` (adjacency lists), in reverse topological order.
pub fn sccs(graph: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut state = SccMutState::new(graph.len());
    for root in 0..graph.len() {
        if !state.visited(root) {
            state.visit(graph, root);
        }
    }
    state.sccs
}
