//! Iterator over the multi-dimensional indices of a shape.

use std::iter::FusedIterator;

use smallvec::{smallvec, SmallVec};

/// Multi-dimensional index with a dynamic number of dimensions.
///
/// Indices of up to 8 dimensions are stored inline.
pub type DynIndex = SmallVec<[usize; 8]>;

/// Iterator over all valid indices of a shape, in row-major order.
///
/// The iterator works like an odometer: the last dimension advances on
/// every step and overflow carries into the next outer dimension. An empty
/// shape (rank 0) yields a single empty index, since a rank-0 array still
/// holds one element. A shape with any zero-sized dimension yields nothing.
pub struct Indices {
    shape: DynIndex,
    next: Option<DynIndex>,
    remaining: usize,
}

impl Indices {
    /// Return an iterator over all indices where each dimension is in the
    /// range `0..shape[dim]`.
    pub fn from_shape(shape: &[usize]) -> Indices {
        // The empty product is 1, which makes the rank-0 case fall out: one
        // step, starting from the empty index.
        let remaining: usize = shape.iter().product();
        Indices {
            shape: shape.iter().copied().collect(),
            next: (remaining > 0).then(|| smallvec![0; shape.len()]),
            remaining,
        }
    }
}

impl Iterator for Indices {
    type Item = DynIndex;

    fn next(&mut self) -> Option<DynIndex> {
        let current = self.next.clone()?;

        let mut next = current.clone();
        let mut done = true;
        for (index, &size) in next.iter_mut().zip(self.shape.iter()).rev() {
            *index += 1;
            if *index < size {
                done = false;
                break;
            }
            *index = 0;
        }
        self.next = (!done).then_some(next);
        self.remaining -= 1;

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Indices {}

impl FusedIterator for Indices {}

#[cfg(test)]
mod tests {
    use super::Indices;

    fn collect(shape: &[usize]) -> Vec<Vec<usize>> {
        Indices::from_shape(shape).map(|index| index.to_vec()).collect()
    }

    #[test]
    fn test_rank_zero_yields_one_empty_index() {
        assert_eq!(collect(&[]), [Vec::<usize>::new()]);
    }

    #[test]
    fn test_zero_sized_dim_yields_nothing() {
        assert_eq!(collect(&[0]).len(), 0);
        assert_eq!(collect(&[2, 0, 3]).len(), 0);
    }

    #[test]
    fn test_row_major_order() {
        let expected: &[&[usize]] = &[&[0], &[1], &[2]];
        assert_eq!(collect(&[3]), expected);

        let expected: &[&[usize]] = &[&[0, 0], &[0, 1], &[0, 2], &[1, 0], &[1, 1], &[1, 2]];
        assert_eq!(collect(&[2, 3]), expected);

        // Inner size-1 dims advance without producing extra steps.
        let expected: &[&[usize]] = &[
            &[0, 0, 0],
            &[0, 0, 1],
            &[1, 0, 0],
            &[1, 0, 1],
            &[2, 0, 0],
            &[2, 0, 1],
        ];
        assert_eq!(collect(&[3, 1, 2]), expected);
    }

    #[test]
    fn test_len() {
        let mut indices = Indices::from_shape(&[2, 2]);
        assert_eq!(indices.len(), 4);
        indices.next();
        assert_eq!(indices.len(), 3);
        assert_eq!(indices.size_hint(), (3, Some(3)));

        assert_eq!(Indices::from_shape(&[]).len(), 1);
        assert_eq!(Indices::from_shape(&[0, 5]).len(), 0);
    }

    #[test]
    fn test_fused_after_end() {
        let mut indices = Indices::from_shape(&[1]);
        assert!(indices.next().is_some());
        assert!(indices.next().is_none());
        assert!(indices.next().is_none());
    }
}
