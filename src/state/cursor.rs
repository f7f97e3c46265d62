/// Wrapping index into a fixed-length catalog

use std::num::NonZeroUsize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    len: NonZeroUsize,
}

impl Cursor {
    pub fn new(len: NonZeroUsize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(&mut self) -> usize {
        self.index = (self.index + 1) % self.len.get();
        self.index
    }

    pub fn previous(&mut self) -> usize {
        self.index = if self.index == 0 {
            self.len.get() - 1
        } else {
            self.index - 1
        };
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(len: usize) -> Cursor {
        Cursor::new(NonZeroUsize::new(len).unwrap())
    }

    #[test]
    fn test_next_and_previous_wrap() {
        let mut c = cursor(3);
        assert_eq!(c.previous(), 2);
        assert_eq!(c.next(), 0);
        assert_eq!(c.next(), 1);
    }

    #[test]
    fn test_navigation_cycles_back_to_start() {
        for len in [1, 2, 7] {
            let mut c = cursor(len);
            c.next();
            let start = c.index();

            for _ in 0..len {
                c.next();
            }
            assert_eq!(c.index(), start);

            for _ in 0..len {
                c.previous();
            }
            assert_eq!(c.index(), start);
        }
    }
}
