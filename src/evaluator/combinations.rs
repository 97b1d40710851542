/// Lexicographic iterator over every `K`-element index subset of `0..n`.
///
/// `Combinations::<5>::new(7)` yields the 21 ways to pick five of seven cards,
/// `Combinations::<5>::new(6)` the 6 ways to pick five of six.
#[derive(Debug, Clone)]
pub struct Combinations<const K: usize> {
    n: usize,
    indices: [usize; K],
    done: bool,
}

impl<const K: usize> Combinations<K> {
    pub fn new(n: usize) -> Self {
        let mut indices = [0; K];
        for (i, slot) in indices.iter_mut().enumerate() {
            *slot = i;
        }
        // K == 0 would yield one empty subset; nothing here needs that
        Self { n, indices, done: K == 0 || K > n }
    }
}

impl<const K: usize> Iterator for Combinations<K> {
    type Item = [usize; K];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.indices;

        // advance the rightmost index that still has room, then pack the tail after it
        let mut i = K;
        loop {
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
            if self.indices[i] < self.n - (K - i) {
                self.indices[i] += 1;
                for j in (i + 1)..K {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }
        }

        Some(result)
    }
}
