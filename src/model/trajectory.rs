use nalgebra::Point2;

/// A fixed-capacity ring buffer of past positions.
///
/// Once the buffer is full, every new sample overwrites the oldest one.
#[derive(Debug, Clone)]
pub struct Trajectory {
    // Invariants:
    //   - samples.len() == capacity, and capacity >= 1
    //   - filled_count <= capacity
    //   - write_index < capacity, and is the slot the next sample goes into
    samples: Vec<Point2<f64>>,
    write_index: usize,
    filled_count: usize,
}

impl Trajectory {
    pub fn new(capacity: usize) -> Self {
        assert!(
            capacity >= 1,
            "Trajectory must hold at least one sample, capacity was {}",
            capacity
        );
        Trajectory {
            samples: vec![Point2::origin(); capacity],
            write_index: 0,
            filled_count: 0,
        }
    }

    pub fn record(&mut self, point: Point2<f64>) {
        self.samples[self.write_index] = point;
        self.write_index = (self.write_index + 1) % self.capacity();
        if self.filled_count < self.capacity() {
            self.filled_count += 1;
        }
    }

    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// Number of valid samples currently held.
    pub fn len(&self) -> usize {
        self.filled_count
    }

    pub fn is_empty(&self) -> bool {
        self.filled_count == 0
    }

    pub fn is_full(&self) -> bool {
        self.filled_count == self.capacity()
    }

    pub fn write_index(&self) -> usize {
        self.write_index
    }

    /// Iterates over the held samples, oldest first.
    ///
    /// The iterator borrows the buffer, so it always agrees with the buffer
    /// state at the moment it was created.
    pub fn iter(&self) -> impl Iterator<Item = Point2<f64>> + Clone + '_ {
        let capacity = self.capacity();
        // (write_index - filled_count) mod capacity, without going negative
        let start = (self.write_index + capacity - self.filled_count) % capacity;
        (0..self.filled_count).map(move |i| self.samples[(start + i) % capacity])
    }

    pub fn to_vec(&self) -> Vec<Point2<f64>> {
        self.iter().collect()
    }

}
