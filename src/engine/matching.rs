//! Maximum-weight matching on general graphs.
//!
//! Implements the Edmonds blossom algorithm in the array-based O(n³)
//! formulation: an alternating-tree search over edge endpoints with dual
//! variables, odd-set ("blossom") contraction, and index recycling for
//! contracted blossoms. Weights are integers; dual variables are kept at
//! twice their nominal value so every slack stays integral.
//!
//! With `max_cardinality` the result is the maximum-weight matching among
//! maximum-cardinality matchings; without it, the maximum-weight set of
//! vertex-disjoint edges (which may leave more nodes unmatched).

use super::graph::CandidateEdge;

/// Sentinel for "no vertex / no endpoint / no edge".
const NONE: usize = usize::MAX;

/// Compute a maximum-weight matching over `num_nodes` vertices.
///
/// Returns a mate vector: `mate[v]` is the vertex matched to `v`, or
/// `None` if `v` is unmatched. An empty edge set yields an all-`None`
/// vector; the function never panics on degenerate input.
pub fn maximum_weight_matching(
    num_nodes: usize,
    edges: &[CandidateEdge],
    max_cardinality: bool,
) -> Vec<Option<usize>> {
    if num_nodes == 0 || edges.is_empty() {
        return vec![None; num_nodes];
    }
    debug_assert!(edges.iter().all(|e| e.a != e.b && e.a < num_nodes && e.b < num_nodes));
    Solver::new(num_nodes, edges, max_cardinality).solve()
}

/// Working state for one matching computation.
///
/// Vertices are `0..nvertex`; contracted blossoms take indices
/// `nvertex..2*nvertex`. Edge endpoint `p` denotes edge `p / 2` entered
/// from side `p % 2`, so `p ^ 1` is the opposite endpoint.
struct Solver<'a> {
    edges: &'a [CandidateEdge],
    max_cardinality: bool,
    nvertex: usize,

    /// endpoint[p] = vertex at endpoint p
    endpoint: Vec<usize>,
    /// neighbend[v] = remote endpoints of edges incident to v
    neighbend: Vec<Vec<usize>>,
    /// mate[v] = remote endpoint of v's matched edge, or NONE
    mate: Vec<usize>,
    /// label[b] = 0 free, 1 S, 2 T (5 marks a breadcrumb during scans)
    label: Vec<u8>,
    /// labelend[b] = endpoint through which b got its label, or NONE
    labelend: Vec<usize>,
    /// inblossom[v] = top-level blossom containing v
    inblossom: Vec<usize>,
    /// blossomparent[b] = immediate parent blossom, or NONE
    blossomparent: Vec<usize>,
    /// blossomchilds[b] = ordered sub-blossoms (base first)
    blossomchilds: Vec<Vec<usize>>,
    /// blossombase[b] = base vertex, or NONE for free blossom slots
    blossombase: Vec<usize>,
    /// blossomendps[b] = endpoints of the edges joining the sub-blossoms
    blossomendps: Vec<Vec<usize>>,
    /// bestedge[b] = least-slack edge to a different S-blossom, or NONE
    bestedge: Vec<usize>,
    /// blossombestedges[b] = per-neighbour least-slack edge cache
    blossombestedges: Vec<Option<Vec<usize>>>,
    /// recycled blossom indices
    unusedblossoms: Vec<usize>,
    /// dualvar[v] = 2u(v) for vertices, z(b) for blossoms
    dualvar: Vec<i64>,
    /// allowedge[k] = edge k has zero slack
    allowedge: Vec<bool>,
    /// scan queue of S-vertices
    queue: Vec<usize>,
}

impl<'a> Solver<'a> {
    fn new(num_nodes: usize, edges: &'a [CandidateEdge], max_cardinality: bool) -> Self {
        let nvertex = num_nodes;
        let nedge = edges.len();
        let maxweight = edges.iter().map(|e| e.weight).max().unwrap_or(0).max(0);

        let mut endpoint = Vec::with_capacity(2 * nedge);
        for e in edges {
            endpoint.push(e.a);
            endpoint.push(e.b);
        }
        let mut neighbend: Vec<Vec<usize>> = vec![Vec::new(); nvertex];
        for (k, e) in edges.iter().enumerate() {
            neighbend[e.a].push(2 * k + 1);
            neighbend[e.b].push(2 * k);
        }

        let mut dualvar = vec![maxweight; nvertex];
        dualvar.extend(std::iter::repeat(0).take(nvertex));

        Self {
            edges,
            max_cardinality,
            nvertex,
            endpoint,
            neighbend,
            mate: vec![NONE; nvertex],
            label: vec![0; 2 * nvertex],
            labelend: vec![NONE; 2 * nvertex],
            inblossom: (0..nvertex).collect(),
            blossomparent: vec![NONE; 2 * nvertex],
            blossomchilds: vec![Vec::new(); 2 * nvertex],
            blossombase: (0..nvertex).chain(std::iter::repeat(NONE).take(nvertex)).collect(),
            blossomendps: vec![Vec::new(); 2 * nvertex],
            bestedge: vec![NONE; 2 * nvertex],
            blossombestedges: vec![None; 2 * nvertex],
            unusedblossoms: (nvertex..2 * nvertex).collect(),
            dualvar,
            allowedge: vec![false; nedge],
            queue: Vec::new(),
        }
    }

    /// 2 * slack of edge k. Non-negative for every edge at all times.
    fn slack(&self, k: usize) -> i64 {
        let e = &self.edges[k];
        self.dualvar[e.a] + self.dualvar[e.b] - 2 * e.weight
    }

    /// All vertices contained in (sub-)blossom b, in child order.
    fn blossom_leaves(&self, b: usize) -> Vec<usize> {
        if b < self.nvertex {
            return vec![b];
        }
        let mut leaves = Vec::new();
        let mut stack = vec![b];
        while let Some(t) = stack.pop() {
            if t < self.nvertex {
                leaves.push(t);
            } else {
                stack.extend(self.blossomchilds[t].iter().rev().copied());
            }
        }
        leaves
    }

    /// Sub-blossom / connecting-endpoint lookups with Python-style
    /// wrap-around indices (j may be negative during blossom walks).
    fn child_at(&self, b: usize, j: isize) -> usize {
        let len = self.blossomchilds[b].len() as isize;
        self.blossomchilds[b][j.rem_euclid(len) as usize]
    }

    fn endp_at(&self, b: usize, j: isize) -> usize {
        let len = self.blossomendps[b].len() as isize;
        self.blossomendps[b][j.rem_euclid(len) as usize]
    }

    /// Label vertex w's top-level blossom with S (t=1) or T (t=2), reached
    /// through endpoint p. S-blossoms enqueue their vertices for scanning;
    /// a T-label immediately propagates S to the mate of the base.
    fn assign_label(&mut self, w: usize, t: u8, p: usize) {
        let b = self.inblossom[w];
        debug_assert!(self.label[w] == 0 && self.label[b] == 0);
        self.label[w] = t;
        self.label[b] = t;
        self.labelend[w] = p;
        self.labelend[b] = p;
        self.bestedge[w] = NONE;
        self.bestedge[b] = NONE;
        if t == 1 {
            let leaves = self.blossom_leaves(b);
            self.queue.extend(leaves);
        } else if t == 2 {
            let base = self.blossombase[b];
            debug_assert!(self.mate[base] != NONE);
            self.assign_label(self.endpoint[self.mate[base]], 1, self.mate[base] ^ 1);
        }
    }

    /// Trace back from both ends of edge (v, w) towards the tree roots.
    /// Returns the base vertex of the first common blossom, or NONE if the
    /// paths reach two different roots (an augmenting path exists).
    fn scan_blossom(&mut self, mut v: usize, mut w: usize) -> usize {
        let mut path = Vec::new();
        let mut base = NONE;
        while v != NONE || w != NONE {
            let mut b = self.inblossom[v];
            if self.label[b] & 4 != 0 {
                base = self.blossombase[b];
                break;
            }
            debug_assert_eq!(self.label[b], 1);
            path.push(b);
            self.label[b] = 5;
            debug_assert_eq!(self.labelend[b], self.mate[self.blossombase[b]]);
            if self.labelend[b] == NONE {
                // Reached a single (unmatched) root.
                v = NONE;
            } else {
                v = self.endpoint[self.labelend[b]];
                b = self.inblossom[v];
                debug_assert_eq!(self.label[b], 2);
                debug_assert!(self.labelend[b] != NONE);
                v = self.endpoint[self.labelend[b]];
            }
            if w != NONE {
                std::mem::swap(&mut v, &mut w);
            }
        }
        for b in path {
            self.label[b] = 1;
        }
        base
    }

    /// Contract the cycle through edge k and `base` into a new blossom.
    fn add_blossom(&mut self, base: usize, k: usize) {
        let (v0, w0) = (self.edges[k].a, self.edges[k].b);
        let bb = self.inblossom[base];
        let mut bv = self.inblossom[v0];
        let mut bw = self.inblossom[w0];
        let b = self.unusedblossoms.pop().expect("blossom pool exhausted");
        self.blossombase[b] = base;
        self.blossomparent[b] = NONE;
        self.blossomparent[bb] = b;

        // Collect the sub-blossoms along the cycle, and the endpoints of
        // the edges connecting them.
        let mut path: Vec<usize> = Vec::new();
        let mut endps: Vec<usize> = Vec::new();
        while bv != bb {
            self.blossomparent[bv] = b;
            path.push(bv);
            endps.push(self.labelend[bv]);
            debug_assert!(self.labelend[bv] != NONE);
            let next = self.endpoint[self.labelend[bv]];
            bv = self.inblossom[next];
        }
        path.push(bb);
        path.reverse();
        endps.reverse();
        endps.push(2 * k);
        while bw != bb {
            self.blossomparent[bw] = b;
            path.push(bw);
            endps.push(self.labelend[bw] ^ 1);
            debug_assert!(self.labelend[bw] != NONE);
            let next = self.endpoint[self.labelend[bw]];
            bw = self.inblossom[next];
        }

        debug_assert_eq!(self.label[bb], 1);
        self.label[b] = 1;
        self.labelend[b] = self.labelend[bb];
        self.dualvar[b] = 0;
        self.blossomchilds[b] = path.clone();
        self.blossomendps[b] = endps;

        // Absorb the vertices; T-labelled ones become scannable S-vertices.
        for u in self.blossom_leaves(b) {
            if self.label[self.inblossom[u]] == 2 {
                self.queue.push(u);
            }
            self.inblossom[u] = b;
        }

        // Merge the per-neighbour least-slack edge caches of the children.
        let mut bestedgeto = vec![NONE; 2 * self.nvertex];
        for &child in &path {
            let nblist: Vec<usize> = match &self.blossombestedges[child] {
                Some(list) => list.clone(),
                None => self
                    .blossom_leaves(child)
                    .into_iter()
                    .flat_map(|u| self.neighbend[u].iter().map(|&p| p / 2))
                    .collect(),
            };
            for k2 in nblist {
                let e2 = &self.edges[k2];
                let j = if self.inblossom[e2.b] == b { e2.a } else { e2.b };
                let bj = self.inblossom[j];
                if bj != b
                    && self.label[bj] == 1
                    && (bestedgeto[bj] == NONE || self.slack(k2) < self.slack(bestedgeto[bj]))
                {
                    bestedgeto[bj] = k2;
                }
            }
            self.blossombestedges[child] = None;
            self.bestedge[child] = NONE;
        }
        let kept: Vec<usize> = bestedgeto.into_iter().filter(|&k2| k2 != NONE).collect();
        self.bestedge[b] = NONE;
        for &k2 in &kept {
            if self.bestedge[b] == NONE || self.slack(k2) < self.slack(self.bestedge[b]) {
                self.bestedge[b] = k2;
            }
        }
        self.blossombestedges[b] = Some(kept);
    }

    /// Expand blossom b, restoring its children to top level. During a
    /// stage (endstage=false) a T-blossom's children are relabelled along
    /// the alternating path through the blossom.
    fn expand_blossom(&mut self, b: usize, endstage: bool) {
        let childs = self.blossomchilds[b].clone();
        for &s in &childs {
            self.blossomparent[s] = NONE;
            if s < self.nvertex {
                self.inblossom[s] = s;
            } else if endstage && self.dualvar[s] == 0 {
                self.expand_blossom(s, endstage);
            } else {
                for v in self.blossom_leaves(s) {
                    self.inblossom[v] = s;
                }
            }
        }

        if !endstage && self.label[b] == 2 {
            debug_assert!(self.labelend[b] != NONE);
            let entrychild = self.inblossom[self.endpoint[self.labelend[b] ^ 1]];
            let mut j = self.blossomchilds[b]
                .iter()
                .position(|&c| c == entrychild)
                .expect("entry child not in expanded blossom") as isize;
            let (jstep, endptrick): (isize, usize) = if j & 1 != 0 {
                j -= self.blossomchilds[b].len() as isize;
                (1, 0)
            } else {
                (-1, 1)
            };

            // Walk from the entry child down to the base, alternating
            // T- and S-relabels along the blossom cycle.
            let mut p = self.labelend[b];
            while j != 0 {
                self.label[self.endpoint[p ^ 1]] = 0;
                let q = self.endp_at(b, j - endptrick as isize) ^ endptrick ^ 1;
                self.label[self.endpoint[q]] = 0;
                self.assign_label(self.endpoint[p ^ 1], 2, p);
                let edge_idx = self.endp_at(b, j - endptrick as isize) / 2;
                self.allowedge[edge_idx] = true;
                j += jstep;
                p = self.endp_at(b, j - endptrick as isize) ^ endptrick;
                self.allowedge[p / 2] = true;
                j += jstep;
            }

            // Relabel the base sub-blossom T without stepping to its mate.
            let bv = self.child_at(b, j);
            self.label[self.endpoint[p ^ 1]] = 2;
            self.label[bv] = 2;
            self.labelend[self.endpoint[p ^ 1]] = p;
            self.labelend[bv] = p;
            self.bestedge[bv] = NONE;

            // The remaining children keep label-free status unless one of
            // their vertices was reached from outside the blossom.
            j += jstep;
            while self.child_at(b, j) != entrychild {
                let bv = self.child_at(b, j);
                if self.label[bv] == 1 {
                    j += jstep;
                    continue;
                }
                let reached = self
                    .blossom_leaves(bv)
                    .into_iter()
                    .find(|&v| self.label[v] != 0);
                if let Some(v) = reached {
                    debug_assert_eq!(self.label[v], 2);
                    debug_assert_eq!(self.inblossom[v], bv);
                    self.label[v] = 0;
                    self.label[self.endpoint[self.mate[self.blossombase[bv]]]] = 0;
                    self.assign_label(v, 2, self.labelend[v]);
                }
                j += jstep;
            }
        }

        // Recycle the blossom slot.
        self.label[b] = 0;
        self.labelend[b] = NONE;
        self.blossomchilds[b].clear();
        self.blossomendps[b].clear();
        self.blossombase[b] = NONE;
        self.blossombestedges[b] = None;
        self.bestedge[b] = NONE;
        self.unusedblossoms.push(b);
    }

    /// Swap matched and unmatched edges inside blossom b so that its base
    /// becomes vertex v.
    fn augment_blossom(&mut self, b: usize, v: usize) {
        let mut t = v;
        while self.blossomparent[t] != b {
            t = self.blossomparent[t];
        }
        if t >= self.nvertex {
            self.augment_blossom(t, v);
        }
        let i = self
            .blossomchilds[b]
            .iter()
            .position(|&c| c == t)
            .expect("vertex not under blossom") as isize;
        let mut j = i;
        let (jstep, endptrick): (isize, usize) = if i & 1 != 0 {
            j -= self.blossomchilds[b].len() as isize;
            (1, 0)
        } else {
            (-1, 1)
        };
        while j != 0 {
            j += jstep;
            let t1 = self.child_at(b, j);
            let p = self.endp_at(b, j - endptrick as isize) ^ endptrick;
            if t1 >= self.nvertex {
                self.augment_blossom(t1, self.endpoint[p]);
            }
            j += jstep;
            let t2 = self.child_at(b, j);
            if t2 >= self.nvertex {
                self.augment_blossom(t2, self.endpoint[p ^ 1]);
            }
            self.mate[self.endpoint[p]] = p ^ 1;
            self.mate[self.endpoint[p ^ 1]] = p;
        }
        // Rotate so the new base child comes first.
        let i = i as usize;
        self.blossomchilds[b].rotate_left(i);
        self.blossomendps[b].rotate_left(i);
        self.blossombase[b] = self.blossombase[self.blossomchilds[b][0]];
        debug_assert_eq!(self.blossombase[b], v);
    }

    /// Augment the matching along the path through edge k and up to the
    /// roots of both alternating trees.
    fn augment_matching(&mut self, k: usize) {
        let starts = [(self.edges[k].a, 2 * k + 1), (self.edges[k].b, 2 * k)];
        for &(start, start_p) in &starts {
            let mut s = start;
            let mut p = start_p;
            loop {
                let bs = self.inblossom[s];
                debug_assert_eq!(self.label[bs], 1);
                debug_assert_eq!(self.labelend[bs], self.mate[self.blossombase[bs]]);
                if bs >= self.nvertex {
                    self.augment_blossom(bs, s);
                }
                self.mate[s] = p;
                if self.labelend[bs] == NONE {
                    // Reached the tree root.
                    break;
                }
                let t = self.endpoint[self.labelend[bs]];
                let bt = self.inblossom[t];
                debug_assert_eq!(self.label[bt], 2);
                debug_assert!(self.labelend[bt] != NONE);
                let next_s = self.endpoint[self.labelend[bt]];
                let j = self.endpoint[self.labelend[bt] ^ 1];
                debug_assert_eq!(self.blossombase[bt], t);
                if bt >= self.nvertex {
                    self.augment_blossom(bt, j);
                }
                self.mate[j] = self.labelend[bt];
                p = self.labelend[bt] ^ 1;
                s = next_s;
            }
        }
    }

    fn solve(mut self) -> Vec<Option<usize>> {
        let nvertex = self.nvertex;

        // Each stage augments the matching by one edge or proves optimality.
        'stages: for _ in 0..nvertex {
            for l in self.label.iter_mut() {
                *l = 0;
            }
            for be in self.bestedge.iter_mut() {
                *be = NONE;
            }
            for cache in self.blossombestedges[nvertex..].iter_mut() {
                *cache = None;
            }
            for a in self.allowedge.iter_mut() {
                *a = false;
            }
            self.queue.clear();

            for v in 0..nvertex {
                if self.mate[v] == NONE && self.label[self.inblossom[v]] == 0 {
                    self.assign_label(v, 1, NONE);
                }
            }

            let mut augmented = false;
            loop {
                // Grow alternating trees from the queued S-vertices.
                while !self.queue.is_empty() && !augmented {
                    let v = self.queue.pop().unwrap();
                    debug_assert_eq!(self.label[self.inblossom[v]], 1);
                    for idx in 0..self.neighbend[v].len() {
                        let p = self.neighbend[v][idx];
                        let k = p / 2;
                        let w = self.endpoint[p];
                        if self.inblossom[v] == self.inblossom[w] {
                            continue;
                        }
                        let mut kslack = 0;
                        if !self.allowedge[k] {
                            kslack = self.slack(k);
                            if kslack <= 0 {
                                self.allowedge[k] = true;
                            }
                        }
                        if self.allowedge[k] {
                            let bw = self.inblossom[w];
                            if self.label[bw] == 0 {
                                self.assign_label(w, 2, p ^ 1);
                            } else if self.label[bw] == 1 {
                                let base = self.scan_blossom(v, w);
                                if base != NONE {
                                    self.add_blossom(base, k);
                                } else {
                                    self.augment_matching(k);
                                    augmented = true;
                                    break;
                                }
                            } else if self.label[w] == 0 {
                                debug_assert_eq!(self.label[bw], 2);
                                self.label[w] = 2;
                                self.labelend[w] = p ^ 1;
                            }
                        } else if self.label[self.inblossom[w]] == 1 {
                            let bv = self.inblossom[v];
                            if self.bestedge[bv] == NONE || kslack < self.slack(self.bestedge[bv]) {
                                self.bestedge[bv] = k;
                            }
                        } else if self.label[w] == 0
                            && (self.bestedge[w] == NONE || kslack < self.slack(self.bestedge[w]))
                        {
                            self.bestedge[w] = k;
                        }
                    }
                }
                if augmented {
                    break;
                }

                // No augmenting path at current slack zero; compute the
                // largest dual adjustment that keeps all duals feasible.
                let mut deltatype = -1i32;
                let mut delta = 0i64;
                let mut deltaedge = NONE;
                let mut deltablossom = NONE;

                if !self.max_cardinality {
                    deltatype = 1;
                    delta = self.dualvar[..nvertex].iter().copied().min().unwrap().max(0);
                }
                for v in 0..nvertex {
                    if self.label[self.inblossom[v]] == 0 && self.bestedge[v] != NONE {
                        let d = self.slack(self.bestedge[v]);
                        if deltatype == -1 || d < delta {
                            delta = d;
                            deltatype = 2;
                            deltaedge = self.bestedge[v];
                        }
                    }
                }
                for b in 0..2 * nvertex {
                    if self.blossomparent[b] == NONE
                        && self.label[b] == 1
                        && self.bestedge[b] != NONE
                    {
                        let kslack = self.slack(self.bestedge[b]);
                        debug_assert_eq!(kslack % 2, 0);
                        let d = kslack / 2;
                        if deltatype == -1 || d < delta {
                            delta = d;
                            deltatype = 3;
                            deltaedge = self.bestedge[b];
                        }
                    }
                }
                for b in nvertex..2 * nvertex {
                    if self.blossombase[b] != NONE
                        && self.blossomparent[b] == NONE
                        && self.label[b] == 2
                        && (deltatype == -1 || self.dualvar[b] < delta)
                    {
                        delta = self.dualvar[b];
                        deltatype = 4;
                        deltablossom = b;
                    }
                }
                if deltatype == -1 {
                    // Max-cardinality mode with nothing left to grow.
                    deltatype = 1;
                    delta = self.dualvar[..nvertex].iter().copied().min().unwrap().max(0);
                }

                for v in 0..nvertex {
                    match self.label[self.inblossom[v]] {
                        1 => self.dualvar[v] -= delta,
                        2 => self.dualvar[v] += delta,
                        _ => {}
                    }
                }
                for b in nvertex..2 * nvertex {
                    if self.blossombase[b] != NONE && self.blossomparent[b] == NONE {
                        match self.label[b] {
                            1 => self.dualvar[b] += delta,
                            2 => self.dualvar[b] -= delta,
                            _ => {}
                        }
                    }
                }

                match deltatype {
                    1 => break,
                    2 => {
                        self.allowedge[deltaedge] = true;
                        let e = &self.edges[deltaedge];
                        let mut i = e.a;
                        if self.label[self.inblossom[i]] == 0 {
                            i = e.b;
                        }
                        debug_assert_eq!(self.label[self.inblossom[i]], 1);
                        self.queue.push(i);
                    }
                    3 => {
                        self.allowedge[deltaedge] = true;
                        let i = self.edges[deltaedge].a;
                        debug_assert_eq!(self.label[self.inblossom[i]], 1);
                        self.queue.push(i);
                    }
                    _ => {
                        self.expand_blossom(deltablossom, false);
                    }
                }
            }

            if !augmented {
                break 'stages;
            }

            // Discard S-blossoms whose dual hit zero; they no longer pay
            // for themselves across stages.
            for b in nvertex..2 * nvertex {
                if self.blossomparent[b] == NONE
                    && self.blossombase[b] != NONE
                    && self.label[b] == 1
                    && self.dualvar[b] == 0
                {
                    self.expand_blossom(b, true);
                }
            }
        }

        self.mate
            .iter()
            .map(|&p| if p == NONE { None } else { Some(self.endpoint[p]) })
            .collect()
    }
}
