//! Reachability over a pather's neighbour relation.

use pathlab_core::{Point, Range};

use crate::traits::Pather;

/// The set of cells connected to a source cell, over a fixed rectangle.
///
/// Buffers are kept between [`fill`](Self::fill) calls.
pub struct Reachable {
    bounds: Range,
    seen: Vec<bool>,
    stack: Vec<Point>,
    nbuf: Vec<Point>,
}

impl Reachable {
    pub fn new(bounds: Range) -> Self {
        Self {
            bounds,
            seen: vec![false; bounds.len()],
            stack: Vec::new(),
            nbuf: Vec::with_capacity(4),
        }
    }

    fn slot(&self, p: Point) -> Option<usize> {
        self.bounds.contains(p).then(|| {
            let (x, y) = (p.x - self.bounds.min.x, p.y - self.bounds.min.y);
            (y * self.bounds.width() + x) as usize
        })
    }

    /// Flood-fill from `from` and return how many cells were reached.
    ///
    /// `from` itself counts even if the pather would not step onto it. A
    /// source outside the bounds reaches nothing.
    pub fn fill<P: Pather>(&mut self, pather: &P, from: Point) -> usize {
        self.seen.fill(false);
        self.stack.clear();
        let Some(i) = self.slot(from) else {
            return 0;
        };
        self.seen[i] = true;
        self.stack.push(from);

        let mut count = 1;
        while let Some(p) = self.stack.pop() {
            self.nbuf.clear();
            pather.neighbors(p, &mut self.nbuf);
            for k in 0..self.nbuf.len() {
                let n = self.nbuf[k];
                if let Some(j) = self.slot(n).filter(|&j| !self.seen[j]) {
                    self.seen[j] = true;
                    self.stack.push(n);
                    count += 1;
                }
            }
        }
        count
    }

    /// Whether `p` was reached by the last [`fill`](Self::fill).
    pub fn contains(&self, p: Point) -> bool {
        self.slot(p).is_some_and(|i| self.seen[i])
    }
}
