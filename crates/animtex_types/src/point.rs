//! Integer coordinates and sparse point sets.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use crate::error::TextureError;

/// An immutable (x, y) pixel coordinate.
///
/// Points order row-major: by `y` first, then by `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
	x: i32,
	y: i32,
}

impl Point {
	/// Creates a new point.
	pub const fn new(x: i32, y: i32) -> Self {
		Self {
			x,
			y,
		}
	}

	/// Returns the x coordinate.
	#[inline]
	pub const fn x(&self) -> i32 {
		self.x
	}

	/// Returns the y coordinate.
	#[inline]
	pub const fn y(&self) -> i32 {
		self.y
	}

	/// Returns true if neither coordinate is negative.
	#[inline]
	pub const fn is_non_negative(&self) -> bool {
		self.x >= 0 && self.y >= 0
	}

	/// Fails with [`TextureError::NegativePoint`] if either coordinate is negative.
	pub fn require_non_negative(&self) -> Result<(), TextureError> {
		if self.is_non_negative() {
			Ok(())
		} else {
			Err(TextureError::NegativePoint {
				x: self.x,
				y: self.y,
			})
		}
	}

	/// Scales the point down to a mipmap level.
	///
	/// Both coordinates are shifted right by `level`, which floors them
	/// to the coordinate grid of an image `2^level` times smaller.
	#[inline]
	pub const fn scale_to_level(&self, level: usize) -> Point {
		let shift = if level > 31 {
			31
		} else {
			level as u32
		};
		Point::new(self.x >> shift, self.y >> shift)
	}
}

impl Ord for Point {
	fn cmp(&self, other: &Self) -> Ordering {
		self.y.cmp(&other.y).then(self.x.cmp(&other.x))
	}
}

impl PartialOrd for Point {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl From<(i32, i32)> for Point {
	fn from((x, y): (i32, i32)) -> Self {
		Self::new(x, y)
	}
}

impl fmt::Display for Point {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({}, {})", self.x, self.y)
	}
}

/// A horizontal run of points in an [`Area`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row {
	/// Leftmost point of the run
	pub start: Point,
	/// Number of consecutive points in the run
	pub width: u32,
}

/// A sparse set of points.
///
/// Images use areas to describe which pixels are "visible", that is,
/// differ from the transparent background. Work such as copying or
/// interpolating frames only needs to visit these points.
///
/// Iteration is row-major.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Area {
	points: BTreeSet<Point>,
}

impl Area {
	/// Creates an empty area.
	pub fn new() -> Self {
		Self {
			points: BTreeSet::new(),
		}
	}

	/// Creates an area covering a full rectangle.
	pub fn from_rect(x: i32, y: i32, width: u32, height: u32) -> Self {
		let mut area = Self::new();
		for row in 0..height as i32 {
			for column in 0..width as i32 {
				area.insert(Point::new(x + column, y + row));
			}
		}
		area
	}

	/// Adds a point. Returns false if it was already present.
	pub fn insert(&mut self, point: Point) -> bool {
		self.points.insert(point)
	}

	/// Removes a point. Returns false if it was not present.
	pub fn remove(&mut self, point: Point) -> bool {
		self.points.remove(&point)
	}

	/// Returns true if the area contains the point.
	#[inline]
	pub fn contains(&self, point: Point) -> bool {
		self.points.contains(&point)
	}

	/// Returns the number of points in the area.
	#[inline]
	pub fn len(&self) -> usize {
		self.points.len()
	}

	/// Returns true if the area contains no points.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}

	/// Returns the union of two areas.
	pub fn union(&self, other: &Area) -> Area {
		Area {
			points: self.points.union(&other.points).copied().collect(),
		}
	}

	/// Adds every point of `other` to this area.
	pub fn extend_from(&mut self, other: &Area) {
		self.points.extend(other.points.iter().copied());
	}

	/// Returns an iterator over the points in row-major order.
	pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
		self.points.iter().copied()
	}

	/// Groups the points into horizontal runs, in row-major order.
	pub fn rows(&self) -> Vec<Row> {
		let mut rows: Vec<Row> = Vec::new();
		for point in &self.points {
			match rows.last_mut() {
				Some(row)
					if row.start.y() == point.y()
						&& row.start.x() + row.width as i32 == point.x() =>
				{
					row.width += 1;
				}
				_ => rows.push(Row {
					start: *point,
					width: 1,
				}),
			}
		}
		rows
	}
}

impl FromIterator<Point> for Area {
	fn from_iter<T: IntoIterator<Item = Point>>(iter: T) -> Self {
		Self {
			points: iter.into_iter().collect(),
		}
	}
}

impl<'a> IntoIterator for &'a Area {
	type Item = Point;
	type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, Point>>;

	fn into_iter(self) -> Self::IntoIter {
		self.points.iter().copied()
	}
}
