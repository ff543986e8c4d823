use super::*;
use crate::errors::GraphError;
use rand::Rng;
use rand_distr::Geometric;
use std::ops::RangeInclusive;

pub trait GnpGenerator: Sized {
    /// Generates a Gilbert (also, wrongly, known as Erdos-Reyni) graph
    /// The `G(n,p)` contains n nodes and each of the `n(n-1)/2` edges exists
    /// independently with probability `p`. Every edge draws its weight uniformly
    /// from `weights`. Edges are emitted in lexicographic order of their endpoints.
    fn random_weighted_gnp<R: Rng>(
        rng: &mut R,
        n: NumNodes,
        p: f64,
        weights: RangeInclusive<Weight>,
    ) -> Result<Self, GraphError>;

    /// Generates a complete graph on `n` nodes with uniform random weights.
    fn random_weighted_complete<R: Rng>(
        rng: &mut R,
        n: NumNodes,
        weights: RangeInclusive<Weight>,
    ) -> Result<Self, GraphError> {
        Self::random_weighted_gnp(rng, n, 1.0, weights)
    }
}

impl GnpGenerator for WeightedGraph {
    fn random_weighted_gnp<R: Rng>(
        rng: &mut R,
        n: NumNodes,
        p: f64,
        weights: RangeInclusive<Weight>,
    ) -> Result<Self, GraphError> {
        // indirection via vector as we need a &mut for rng and the weights also need rng
        let pairs: Vec<_> = BernoulliSamplingRange::new(rng, 0, (n as i64) * (n as i64), p)
            .filter_map(|x| {
                let u = x / (n as i64);
                let v = x % (n as i64);
                (u < v).then_some((u as Node, v as Node))
            })
            .collect();

        let edges: Vec<_> = pairs
            .into_iter()
            .map(|(u, v)| WeightedEdge(u, v, rng.gen_range(weights.clone())))
            .collect();

        WeightedGraph::try_from_edges(n, edges)
    }
}

/// Provides an iterator similarly to Range, but
/// includes each element i.i.d. with probability of p
pub struct BernoulliSamplingRange<'a, R: Rng> {
    current: i64,
    end: i64,
    distr: Option<Geometric>,
    rng: &'a mut R,
}

impl<'a, R: Rng> BernoulliSamplingRange<'a, R> {
    pub fn new(rng: &'a mut R, begin: i64, end: i64, prob: f64) -> Self {
        debug_assert!(begin <= end);
        debug_assert!((0.0..=1.0).contains(&prob));
        Self {
            rng,
            current: begin - 1,
            end,
            // a probability of zero yields no elements at all
            distr: Geometric::new(prob).ok().filter(|_| prob > 0.0),
        }
    }

    fn try_advance(&mut self) {
        if self.current >= self.end {
            return;
        }

        let Some(distr) = self.distr.as_ref() else {
            self.current = self.end;
            return;
        };

        let skip = self.rng.sample(distr);
        if skip > i64::MAX as u64 {
            self.current = self.end;
        } else {
            self.current += 1;
            self.current = match self.current.checked_add(skip as i64) {
                Some(x) => x,
                None => self.end,
            }
        }
    }
}

impl<R: Rng> Iterator for BernoulliSamplingRange<'_, R> {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        self.try_advance();
        (self.current < self.end).then_some(self.current)
    }
}
