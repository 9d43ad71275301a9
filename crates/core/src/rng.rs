//! RNG module - bag random piece generation
//!
//! Implements the "bag" randomization algorithm used in modern Tetris,
//! generalized to any number of block definitions: each bag contains every
//! definition index exactly once, shuffled. Draws from the bag until empty,
//! then generates a new bag.
//!
//! Also provides a simple LCG for deterministic testing.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Bag generator over block definition indices `0..size`
#[derive(Debug, Clone)]
pub struct PieceBag {
    size: usize,
    bag: Vec<usize>,
    /// Index into current bag
    bag_index: usize,
    rng: SimpleRng,
}

impl PieceBag {
    /// Create a bag over `size` definitions. `size` must be non-zero.
    pub fn new(size: usize, seed: u32) -> Self {
        let mut bag = Self {
            size,
            bag: Vec::with_capacity(size),
            bag_index: 0,
            rng: SimpleRng::new(seed),
        };
        bag.refill();
        bag
    }

    fn refill(&mut self) {
        self.bag.clear();
        self.bag.extend(0..self.size);
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Peek at the next index without consuming it.
    pub fn peek(&self) -> usize {
        if self.bag_index < self.bag.len() {
            return self.bag[self.bag_index];
        }
        // Preview the next bag from a copy of the RNG so draw() stays consistent.
        let mut preview_rng = self.rng.clone();
        let mut next: Vec<usize> = (0..self.size).collect();
        preview_rng.shuffle(&mut next);
        next[0]
    }

    /// Draw the next definition index
    pub fn draw(&mut self) -> usize {
        if self.bag_index >= self.bag.len() {
            self.refill();
        }
        let index = self.bag[self.bag_index];
        self.bag_index += 1;
        index
    }

    pub fn size(&self) -> usize {
        self.size
    }
}
