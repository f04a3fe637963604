//! Fixed-size 2-D grid
//!
//! [`Grid`] stores `width * height` cells of a value type and answers the
//! questions most map-shaped puzzles ask: what is at a coordinate, what is in
//! this row or column, and which cells surround a point.
//!
//! # Coordinates
//!
//! A cell is addressed by a [`Point`] `{ x, y }` with `0 <= x < width` and
//! `0 <= y < height`. Grids built from text put line `i` at `x = i` and the
//! `j`-th character of that line at `y = j`, so `row(x)` is a line of input.
//! Enumeration is row-major: `x` is the outer index, `y` the inner one.
//!
//! Every coordinate access is bounds checked. Out-of-range points fail with
//! [`GridError::OutOfRange`]; nothing is clamped or wrapped.
//!
//! # Example
//!
//! ```rust
//! use advent_challenges::utils::grid::{Axis, Grid, Point};
//!
//! let grid = Grid::parse_chars("abc\ndef\nghi").unwrap();
//!
//! assert_eq!(grid.get(Point::new(1, 1)).unwrap(), 'e');
//! assert_eq!(grid.slice(1, Axis::X).unwrap(), vec!['d', 'e', 'f']);
//! assert_eq!(grid.cartesian_neighbors(Point::new(0, 0)).unwrap(), vec!['d', 'b']);
//! assert!(grid.get(Point::new(3, 0)).is_err());
//! ```

mod point;


pub use point::{Axis, Point};

use std::fmt;
use std::iter::Enumerate;
use std::ops::{Index, IndexMut};
use std::slice;
use thiserror::Error;

/// Up, down, left, right.
const CARTESIAN_OFFSETS: [Point; 4] = [
    Point::new(-1, 0),
    Point::new(1, 0),
    Point::new(0, -1),
    Point::new(0, 1),
];

/// Up-left, up-right, down-left, down-right.
const DIAGONAL_OFFSETS: [Point; 4] = [
    Point::new(-1, -1),
    Point::new(-1, 1),
    Point::new(1, -1),
    Point::new(1, 1),
];

const HIGHLIGHT_START: &str = "\x1b[32m";
const HIGHLIGHT_END: &str = "\x1b[0m";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("point ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfRange {
        x: isize,
        y: isize,
        width: usize,
        height: usize,
    },
    #[error("slice index {index} along {axis:?} is outside 0..{len}")]
    SliceOutOfRange { index: usize, axis: Axis, len: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("grid input has no cells")]
    Empty,
}

/// Dense, fixed-size 2-D grid stored `x`-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Default + Clone> Grid<T> {
    /// A `width x height` grid of `T::default()`.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, T::default())
    }
}

impl<T: Clone> Grid<T> {
    /// A `width x height` grid with every cell set to `value`.
    ///
    /// # Panics
    ///
    /// If `width * height` overflows `usize`.
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        let len = width
            .checked_mul(height)
            .unwrap_or_else(|| panic!("a {width}x{height} grid has more cells than usize can count"));
        Self {
            width,
            height,
            cells: vec![value; len],
        }
    }

    /// Build a grid from rows, `rows[x][y]`.
    ///
    /// Every row must have the same, non-zero length.
    pub fn from_raw(rows: Vec<Vec<T>>) -> Result<Self, GridError> {
        let width = rows.len();
        let height = rows.first().map_or(0, Vec::len);
        if height == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(width.saturating_mul(height));
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != height {
                return Err(GridError::Ragged {
                    row,
                    expected: height,
                    found: values.len(),
                });
            }
            cells.extend(values);
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Copy the grid back out as rows, `rows[x][y]`.
    pub fn to_raw(&self) -> Vec<Vec<T>> {
        if self.height == 0 {
            return vec![Vec::new(); self.width];
        }
        self.cells.chunks(self.height).map(<[T]>::to_vec).collect()
    }

    pub fn get(&self, point: Point) -> Result<T, GridError> {
        self.get_ref(point).cloned()
    }

    /// Copy of every cell along one axis.
    ///
    /// `Axis::X` fixes `x = index` and returns `height` values (a row);
    /// `Axis::Y` fixes `y = index` and returns `width` values (a column).
    pub fn slice(&self, index: usize, axis: Axis) -> Result<Vec<T>, GridError> {
        let len = self.len_of(axis);
        if index >= len {
            return Err(GridError::SliceOutOfRange { index, axis, len });
        }

        Ok(match axis {
            Axis::X => self.cells[index * self.height..(index + 1) * self.height].to_vec(),
            Axis::Y => (0..self.width)
                .map(|x| self.cells[x * self.height + index].clone())
                .collect(),
        })
    }

    pub fn row(&self, x: usize) -> Result<Vec<T>, GridError> {
        self.slice(x, Axis::X)
    }

    pub fn column(&self, y: usize) -> Result<Vec<T>, GridError> {
        self.slice(y, Axis::Y)
    }

    /// Values of the up-to-4 orthogonal neighbors, in up, down, left, right order.
    pub fn cartesian_neighbors(&self, point: Point) -> Result<Vec<T>, GridError> {
        self.cartesian_neighbors_where(point, |_, _| true)
    }

    /// Like [`cartesian_neighbors`](Self::cartesian_neighbors), keeping only
    /// neighbors for which `predicate(position, value)` holds.
    pub fn cartesian_neighbors_where<F>(&self, point: Point, predicate: F) -> Result<Vec<T>, GridError>
    where
        F: FnMut(Point, &T) -> bool,
    {
        let points = self.cartesian_neighbor_points(point)?;
        Ok(self.collect_where(points, predicate))
    }

    /// Values of the up-to-8 surrounding cells: the cartesian neighbors first,
    /// then up-left, up-right, down-left, down-right.
    pub fn all_neighbors(&self, point: Point) -> Result<Vec<T>, GridError> {
        self.all_neighbors_where(point, |_, _| true)
    }

    pub fn all_neighbors_where<F>(&self, point: Point, predicate: F) -> Result<Vec<T>, GridError>
    where
        F: FnMut(Point, &T) -> bool,
    {
        let points = self.all_neighbor_points(point)?;
        Ok(self.collect_where(points, predicate))
    }

    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }

    fn collect_where<I, F>(&self, points: I, mut predicate: F) -> Vec<T>
    where
        I: Iterator<Item = Point>,
        F: FnMut(Point, &T) -> bool,
    {
        points
            .map(|p| (p, &self.cells[self.offset_unchecked(p)]))
            .filter(|(p, value)| predicate(*p, *value))
            .map(|(_, value)| value.clone())
            .collect()
    }
}

impl Grid<char> {
    /// One row per non-blank line, surrounding whitespace trimmed.
    pub fn parse_chars(input: &str) -> Result<Self, GridError> {
        let rows = input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().collect())
            .collect();
        Self::from_raw(rows)
    }
}

impl<T> Grid<T> {
    /// Extent of the `x` axis.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Extent of the `y` axis.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len_of(&self, axis: Axis) -> usize {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        usize::try_from(point.x).is_ok_and(|x| x < self.width)
            && usize::try_from(point.y).is_ok_and(|y| y < self.height)
    }

    pub fn get_ref(&self, point: Point) -> Result<&T, GridError> {
        let offset = self.offset(point)?;
        Ok(&self.cells[offset])
    }

    pub fn get_mut(&mut self, point: Point) -> Result<&mut T, GridError> {
        let offset = self.offset(point)?;
        Ok(&mut self.cells[offset])
    }

    pub fn set(&mut self, point: Point, value: T) -> Result<(), GridError> {
        *self.get_mut(point)? = value;
        Ok(())
    }

    /// Overwrite every cell with a value computed from its coordinate.
    pub fn fill_with<F>(&mut self, mut f: F)
    where
        F: FnMut(Point) -> T,
    {
        let height = self.height;
        for (offset, cell) in self.cells.iter_mut().enumerate() {
            *cell = f(point_at(offset, height));
        }
    }

    /// `(coordinate, value)` pairs in row-major order.
    ///
    /// Borrows the grid, so every call sees the current cell values.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            cells: self.cells.iter().enumerate(),
            height: self.height,
        }
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        let height = self.height;
        (0..self.cells.len()).map(move |offset| point_at(offset, height))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.cells.iter()
    }

    /// First coordinate (row-major) whose value matches `predicate`.
    pub fn position<F>(&self, mut predicate: F) -> Option<Point>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter()
            .find(|(_, value)| predicate(value))
            .map(|(point, _)| point)
    }

    /// In-bounds orthogonal neighbor coordinates of `point`.
    pub fn cartesian_neighbor_points(
        &self,
        point: Point,
    ) -> Result<impl Iterator<Item = Point> + '_, GridError> {
        self.offset(point)?;
        Ok(CARTESIAN_OFFSETS
            .iter()
            .map(move |&delta| point + delta)
            .filter(move |p| self.contains(*p)))
    }

    /// In-bounds orthogonal and diagonal neighbor coordinates of `point`.
    pub fn all_neighbor_points(
        &self,
        point: Point,
    ) -> Result<impl Iterator<Item = Point> + '_, GridError> {
        self.offset(point)?;
        Ok(CARTESIAN_OFFSETS
            .iter()
            .chain(DIAGONAL_OFFSETS.iter())
            .map(move |&delta| point + delta)
            .filter(move |p| self.contains(*p)))
    }

    pub fn map<U, F>(&self, mut f: F) -> Grid<U>
    where
        F: FnMut(Point, &T) -> U,
    {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.iter().map(|(point, value)| f(point, value)).collect(),
        }
    }

    pub fn try_map<U, E, F>(&self, mut f: F) -> Result<Grid<U>, E>
    where
        F: FnMut(Point, &T) -> Result<U, E>,
    {
        Ok(Grid {
            width: self.width,
            height: self.height,
            cells: self
                .iter()
                .map(|(point, value)| f(point, value))
                .collect::<Result<_, _>>()?,
        })
    }

    fn offset(&self, point: Point) -> Result<usize, GridError> {
        if self.contains(point) {
            Ok(self.offset_unchecked(point))
        } else {
            Err(GridError::OutOfRange {
                x: point.x,
                y: point.y,
                width: self.width,
                height: self.height,
            })
        }
    }

    fn offset_unchecked(&self, point: Point) -> usize {
        point.x as usize * self.height + point.y as usize
    }
}

fn point_at(offset: usize, height: usize) -> Point {
    Point::new((offset / height) as isize, (offset % height) as isize)
}

impl<T> Index<Point> for Grid<T> {
    type Output = T;

    fn index(&self, point: Point) -> &T {
        match self.get_ref(point) {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T> IndexMut<Point> for Grid<T> {
    fn index_mut(&mut self, point: Point) -> &mut T {
        match self.offset(point) {
            Ok(offset) => &mut self.cells[offset],
            Err(e) => panic!("{e}"),
        }
    }
}

/// Iterator returned by [`Grid::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    cells: Enumerate<slice::Iter<'a, T>>,
    height: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Point, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let (offset, value) = self.cells.next()?;
        Some((point_at(offset, self.height), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cells.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a Grid<T> {
    type Item = (Point, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Display> Grid<T> {
    /// Render like [`Display`](fmt::Display), colouring `highlighted` cells.
    pub fn render_highlighted(&self, highlighted: &[Point]) -> String {
        let mut out = String::new();
        for (point, value) in self.iter() {
            if point.y == 0 && point.x > 0 {
                out.push('\n');
            }
            if highlighted.contains(&point) {
                out.push_str(&format!("{HIGHLIGHT_START}{value}{HIGHLIGHT_END}"));
            } else {
                out.push_str(&value.to_string());
            }
        }
        out
    }
}

/// One line per `x`, no trailing newline.
impl<T: fmt::Display> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (point, value) in self.iter() {
            if point.y == 0 && point.x > 0 {
                writeln!(f)?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}
