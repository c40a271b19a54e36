//! Socket-side assignment solver.
//!
//! For every node the solver picks which of the four sides each socket sits
//! on, and the ordering within that side, so that connected sockets aim at
//! their counterparts. Per node it exhaustively enumerates all `4^k` side
//! arrangements (capped at k = 7 sockets) and keeps the one with minimum
//! total squared distance to the connected sockets' current positions. The
//! sweep repeats for a fixed number of rounds, each node seeing the already
//! updated positions of nodes solved earlier in the same round, which is
//! enough for the joint assignment to settle in practice without being a
//! true fixed-point solver.

use std::collections::HashMap;
use std::f32::consts::PI;

use serde::Serialize;

use crate::model::{Link, Node, Side, SocketKind, SocketRef, SocketSlot, Vec2};

/// Number of relaxation rounds. Empirically sufficient for assignments to
/// stabilize; kept as a tunable rather than iterating to convergence.
pub const ITERATIONS: usize = 3;

/// Nodes with more sockets keep their default sides: `4^8` candidates is too
/// expensive to re-run on every layout pass.
pub const MAX_SOLVED_SOCKETS: usize = 7;

/// Sockets sharing a side are centered and evenly spaced along this fraction
/// of the side's extent.
pub const SIDE_FILL: f32 = 0.8;

#[derive(Clone, Copy, Debug)]
pub struct LayoutParams {
    pub node_w: f32,
    pub node_h: f32,
    pub iterations: usize,
    pub max_sockets: usize,
    pub side_fill: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        LayoutParams {
            node_w: 200.0,
            node_h: 110.0,
            iterations: ITERATIONS,
            max_sockets: MAX_SOLVED_SOCKETS,
            side_fill: SIDE_FILL,
        }
    }
}

/// Solved placement for one socket.
#[derive(Clone, Debug, Serialize)]
pub struct SocketLayout {
    pub side: Side,
    pub slot: SocketSlot,
    /// Position within the side, along the side's axis.
    pub index: usize,
    /// Total sockets sharing the side.
    pub count: usize,
    /// World-space anchor point.
    pub point: Vec2,
}

/// Joint assignment for the whole graph, recomputed whenever nodes, links or
/// node positions change. Never persisted.
#[derive(Clone, Debug, Default)]
pub struct SideLayout {
    sockets: HashMap<SocketRef, SocketLayout>,
}

impl SideLayout {
    pub fn get(&self, socket: &SocketRef) -> Option<&SocketLayout> {
        self.sockets.get(socket)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SocketRef, &SocketLayout)> {
        self.sockets.iter()
    }

    pub fn len(&self) -> usize {
        self.sockets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sockets.is_empty()
    }
}

fn side_idx(side: Side) -> usize {
    match side {
        Side::Top => 0,
        Side::Right => 1,
        Side::Bottom => 2,
        Side::Left => 3,
    }
}

/// Anchor point for the socket at `index` of `count` on `side` of a node
/// whose top-left corner is `pos`.
pub fn socket_point(pos: Vec2, side: Side, index: usize, count: usize, params: &LayoutParams) -> Vec2 {
    let count = count.max(1);
    let frac = (1.0 - params.side_fill) * 0.5
        + params.side_fill * (index + 1) as f32 / (count + 1) as f32;
    match side {
        Side::Top => Vec2::new(pos.x + params.node_w * frac, pos.y),
        Side::Bottom => Vec2::new(pos.x + params.node_w * frac, pos.y + params.node_h),
        Side::Left => Vec2::new(pos.x, pos.y + params.node_h * frac),
        Side::Right => Vec2::new(pos.x + params.node_w, pos.y + params.node_h * frac),
    }
}

fn slot_for(side: Side, index: usize, count: usize) -> SocketSlot {
    let plain = match side {
        Side::Top => SocketSlot::Top,
        Side::Right => SocketSlot::Right,
        Side::Bottom => SocketSlot::Bottom,
        Side::Left => SocketSlot::Left,
    };
    let first = match side {
        Side::Top | Side::Left => SocketSlot::TopLeft,
        Side::Right => SocketSlot::TopRight,
        Side::Bottom => SocketSlot::BottomLeft,
    };
    let last = match side {
        Side::Top => SocketSlot::TopRight,
        Side::Right | Side::Bottom => SocketSlot::BottomRight,
        Side::Left => SocketSlot::BottomLeft,
    };
    match count {
        2 => {
            if index == 0 {
                first
            } else {
                last
            }
        }
        3 => match index {
            0 => first,
            1 => plain,
            _ => last,
        },
        _ => plain,
    }
}

struct Solver<'a> {
    nodes: &'a [Node],
    positions: &'a HashMap<String, Vec2>,
    params: &'a LayoutParams,
    neighbors: HashMap<SocketRef, Vec<SocketRef>>,
    sides: HashMap<SocketRef, Side>,
    points: HashMap<SocketRef, Vec2>,
}

impl<'a> Solver<'a> {
    fn new(nodes: &'a [Node], links: &'a [Link], positions: &'a HashMap<String, Vec2>, params: &'a LayoutParams) -> Self {
        let mut neighbors: HashMap<SocketRef, Vec<SocketRef>> = HashMap::new();
        for link in links {
            let out = link.output_ref();
            let inp = link.input_ref();
            neighbors.entry(out.clone()).or_default().push(inp.clone());
            neighbors.entry(inp).or_default().push(out);
        }

        let mut sides = HashMap::new();
        for node in nodes {
            for (kind, label) in node.sockets() {
                sides.insert(SocketRef::new(node.id.clone(), kind, label), kind.default_side());
            }
        }

        let mut solver = Solver {
            nodes,
            positions,
            params,
            neighbors,
            sides,
            points: HashMap::new(),
        };
        for node in nodes {
            solver.refresh_points(node);
        }
        solver
    }

    fn node_pos(&self, node: &Node) -> Vec2 {
        self.positions.get(&node.id).copied().unwrap_or_default()
    }

    /// Recompute the world points of one node's sockets from its current
    /// side assignment.
    fn refresh_points(&mut self, node: &Node) {
        let pos = self.node_pos(node);
        let refs: Vec<SocketRef> = node
            .sockets()
            .map(|(kind, label)| SocketRef::new(node.id.clone(), kind, label))
            .collect();
        let mut counts = [0usize; 4];
        for r in &refs {
            counts[side_idx(self.sides[r])] += 1;
        }
        let mut taken = [0usize; 4];
        for r in &refs {
            let side = self.sides[r];
            let si = side_idx(side);
            let p = socket_point(pos, side, taken[si], counts[si], self.params);
            taken[si] += 1;
            self.points.insert(r.clone(), p);
        }
    }

    /// Cost of a candidate arrangement: sum of squared distances from every
    /// connected socket to its counterparts' current positions.
    fn arrangement_cost(&self, pos: Vec2, assign: &[Side], neigh: &[Vec<Vec2>]) -> f32 {
        let mut counts = [0usize; 4];
        for s in assign {
            counts[side_idx(*s)] += 1;
        }
        let mut taken = [0usize; 4];
        let mut cost = 0.0;
        for (i, side) in assign.iter().enumerate() {
            let si = side_idx(*side);
            let idx = taken[si];
            taken[si] += 1;
            if neigh[i].is_empty() {
                continue;
            }
            let p = socket_point(pos, *side, idx, counts[si], self.params);
            for np in &neigh[i] {
                cost += p.dist_sq(*np);
            }
        }
        cost
    }

    fn solve_node(&mut self, node: &Node) {
        let k = node.socket_count();
        if k == 0 {
            return;
        }
        if k > self.params.max_sockets {
            log::debug!(
                "node {} has {} sockets, above the {}-socket solver cutoff; keeping default sides",
                node.id,
                k,
                self.params.max_sockets
            );
            return;
        }

        let refs: Vec<SocketRef> = node
            .sockets()
            .map(|(kind, label)| SocketRef::new(node.id.clone(), kind, label))
            .collect();
        let neigh: Vec<Vec<Vec2>> = refs
            .iter()
            .map(|r| {
                self.neighbors
                    .get(r)
                    .map(|ns| ns.iter().filter_map(|n| self.points.get(n).copied()).collect())
                    .unwrap_or_default()
            })
            .collect();
        if neigh.iter().all(|n| n.is_empty()) {
            return; // nothing to aim at; defaults stand
        }

        let pos = self.node_pos(node);
        let mut best: Vec<Side> = refs.iter().map(|r| self.sides[r]).collect();
        let mut best_cost = self.arrangement_cost(pos, &best, &neigh);

        let mut assign = vec![Side::Top; k];
        for code in 0..4usize.pow(k as u32) {
            let mut c = code;
            for slot in assign.iter_mut() {
                *slot = Side::ALL[c & 3];
                c >>= 2;
            }
            let cost = self.arrangement_cost(pos, &assign, &neigh);
            if cost < best_cost {
                best_cost = cost;
                best.copy_from_slice(&assign);
            }
        }

        for (r, side) in refs.iter().zip(best.iter()) {
            self.sides.insert(r.clone(), *side);
        }
        self.refresh_points(node);
    }

    /// Final pass: order sockets within each side by the angular direction
    /// from the node center toward the centroid of their connected
    /// counterparts, then map each to its fine-grained slot.
    fn finish(self) -> SideLayout {
        let mut out = SideLayout::default();
        for node in self.nodes {
            let pos = self.node_pos(node);
            let center = Vec2::new(pos.x + self.params.node_w * 0.5, pos.y + self.params.node_h * 0.5);

            let mut by_side: [Vec<(SocketRef, f32)>; 4] = Default::default();
            for (kind, label) in node.sockets() {
                let r = SocketRef::new(node.id.clone(), kind, label);
                let angle = self.socket_angle(&r, kind, center);
                by_side[side_idx(self.sides[&r])].push((r, angle));
            }

            for (si, group) in by_side.iter_mut().enumerate() {
                let side = Side::ALL[si];
                group.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
                if side == Side::Bottom {
                    // The bottom edge runs opposite the angle sweep.
                    group.reverse();
                }
                let count = group.len();
                for (index, (r, _)) in group.drain(..).enumerate() {
                    let point = socket_point(pos, side, index, count, self.params);
                    out.sockets.insert(
                        r,
                        SocketLayout {
                            side,
                            slot: slot_for(side, index, count),
                            index,
                            count,
                            point,
                        },
                    );
                }
            }
        }
        out
    }

    fn socket_angle(&self, r: &SocketRef, kind: SocketKind, center: Vec2) -> f32 {
        let neighbors = match self.neighbors.get(r) {
            Some(ns) if !ns.is_empty() => ns,
            _ => {
                // Unconnected sockets sort to a side-appropriate default.
                return match kind {
                    SocketKind::Input => PI,
                    SocketKind::Output => 0.0,
                };
            }
        };
        let mut cx = 0.0;
        let mut cy = 0.0;
        let mut n = 0usize;
        for nref in neighbors {
            if let Some(p) = self.points.get(nref) {
                cx += p.x;
                cy += p.y;
                n += 1;
            }
        }
        if n == 0 {
            return match kind {
                SocketKind::Input => PI,
                SocketKind::Output => 0.0,
            };
        }
        let cx = cx / n as f32;
        let cy = cy / n as f32;
        (cy - center.y).atan2(cx - center.x)
    }
}

/// Run the solver over the current node/link/position snapshot.
///
/// `links` must already be filtered to valid links (both endpoints present).
/// O(nodes × 4^max_sockets) per round; callers memoize the result on the
/// data version so unrelated re-renders never re-enter this.
pub fn solve(
    nodes: &[Node],
    links: &[Link],
    positions: &HashMap<String, Vec2>,
    params: &LayoutParams,
) -> SideLayout {
    let mut solver = Solver::new(nodes, links, positions, params);
    for _ in 0..params.iterations {
        for node in nodes {
            solver.solve_node(node);
        }
    }
    solver.finish()
}
