//! Node lattice and the exclusion zone carved out of it.
//!
//! The grid is rebuilt from scratch whenever the canvas size or the zone
//! changes. It always overhangs the canvas by one spacing on each axis so that
//! lines run off every edge.

/// A point in canvas-local CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal position in CSS pixels.
	pub x: f64,
	/// Vertical position in CSS pixels.
	pub y: f64,
}

impl Point {
	/// Point at `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Linear interpolation towards `other`.
	pub fn lerp(self, other: Point, t: f64) -> Point {
		Point {
			x: self.x + (other.x - self.x) * t,
			y: self.y + (other.y - self.y) * t,
		}
	}
}

/// One of the four axis directions a signal can travel in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
	/// Towards higher columns.
	Right,
	/// Towards lower columns.
	Left,
	/// Towards higher rows.
	Down,
	/// Towards lower rows.
	Up,
}

impl Direction {
	/// All directions, in the order initial directions are considered.
	pub const ALL: [Direction; 4] = [
		Direction::Right,
		Direction::Left,
		Direction::Down,
		Direction::Up,
	];

	/// `(d_row, d_col)` for one step in this direction.
	pub const fn delta(self) -> (i32, i32) {
		match self {
			Direction::Right => (0, 1),
			Direction::Left => (0, -1),
			Direction::Down => (1, 0),
			Direction::Up => (-1, 0),
		}
	}

	/// True for `Left` and `Right`.
	pub const fn is_horizontal(self) -> bool {
		matches!(self, Direction::Right | Direction::Left)
	}

	/// The two directions at right angles to this one.
	pub const fn perpendicular(self) -> [Direction; 2] {
		if self.is_horizontal() {
			[Direction::Down, Direction::Up]
		} else {
			[Direction::Right, Direction::Left]
		}
	}
}

/// Lattice coordinate. Signed so that neighbours off the edge are expressible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GridPos {
	/// Row index, top to bottom.
	pub row: i32,
	/// Column index, left to right.
	pub col: i32,
}

impl GridPos {
	/// Position at `(row, col)`.
	pub const fn new(row: i32, col: i32) -> Self {
		Self { row, col }
	}

	/// Neighbouring position one step in `dir`. May fall outside the grid.
	pub const fn step(self, dir: Direction) -> GridPos {
		let (dr, dc) = dir.delta();
		GridPos {
			row: self.row + dr,
			col: self.col + dc,
		}
	}

	/// Manhattan distance to `other`.
	pub fn distance(self, other: GridPos) -> u32 {
		self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
	}
}

/// Axis-aligned rectangle, in canvas-local pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	/// Left edge.
	pub x: f64,
	/// Top edge.
	pub y: f64,
	/// Width.
	pub w: f64,
	/// Height.
	pub h: f64,
}

impl Rect {
	/// Rectangle with its top-left corner at `(x, y)`.
	pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
		Self { x, y, w, h }
	}
}

/// Region whose nodes are removed from the grid (behind the hero copy).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Zone {
	/// Excluded area in canvas coordinates.
	pub rect: Rect,
}

impl Zone {
	/// Build the zone for a content element's client rect relative to its
	/// container's client rect, grown by `padding` on every side.
	pub fn from_bounds(container: Rect, content: Rect, padding: f64) -> Self {
		Self {
			rect: Rect {
				x: content.x - container.x - padding,
				y: content.y - container.y - padding,
				w: content.w + padding * 2.0,
				h: content.h + padding * 2.0,
			},
		}
	}

	/// Border-inclusive containment test.
	pub fn contains(&self, p: Point) -> bool {
		let r = &self.rect;
		p.x >= r.x && p.x <= r.x + r.w && p.y >= r.y && p.y <= r.y + r.h
	}
}

/// Row-major lattice of optional node positions.
#[derive(Clone, Debug, Default)]
pub struct Grid {
	rows: usize,
	cols: usize,
	spacing: f64,
	origin: Point,
	nodes: Vec<Option<Point>>,
}

impl Grid {
	/// Lay out a lattice covering `width` x `height` with one spacing of
	/// overhang, centred on the canvas, minus every node inside `zone`.
	pub fn build(width: f64, height: f64, spacing: f64, zone: Option<&Zone>) -> Self {
		let (cols, rows) = (
			span_count(width, spacing) + 1,
			span_count(height, spacing) + 1,
		);
		let origin = Point {
			x: (width.max(0.0) - (cols - 1) as f64 * spacing) / 2.0,
			y: (height.max(0.0) - (rows - 1) as f64 * spacing) / 2.0,
		};

		let mut nodes = Vec::with_capacity(rows * cols);
		for r in 0..rows {
			for c in 0..cols {
				let p = Point {
					x: origin.x + c as f64 * spacing,
					y: origin.y + r as f64 * spacing,
				};
				let excluded = zone.is_some_and(|z| z.contains(p));
				nodes.push((!excluded).then_some(p));
			}
		}

		Self {
			rows,
			cols,
			spacing,
			origin,
			nodes,
		}
	}

	/// Number of node rows.
	pub fn rows(&self) -> usize {
		self.rows
	}

	/// Number of node columns.
	pub fn cols(&self) -> usize {
		self.cols
	}

	/// Distance between adjacent nodes.
	pub fn spacing(&self) -> f64 {
		self.spacing
	}

	/// Position a node at `(row, col)` has or would have, ignoring holes.
	pub fn layout_position(&self, row: usize, col: usize) -> Point {
		Point {
			x: self.origin.x + col as f64 * self.spacing,
			y: self.origin.y + row as f64 * self.spacing,
		}
	}

	fn index(&self, pos: GridPos) -> Option<usize> {
		let (r, c) = (usize::try_from(pos.row).ok()?, usize::try_from(pos.col).ok()?);
		(r < self.rows && c < self.cols).then_some(r * self.cols + c)
	}

	/// The node at `pos`, or `None` for holes and out-of-range coordinates.
	pub fn node(&self, pos: GridPos) -> Option<Point> {
		self.index(pos).and_then(|i| self.nodes[i])
	}

	/// Whether `pos` is inside the grid and not excluded.
	pub fn has_node(&self, pos: GridPos) -> bool {
		self.node(pos).is_some()
	}

	/// Directions from `pos` that lead to a present node, in [`Direction::ALL`] order.
	pub fn exits(&self, pos: GridPos) -> impl Iterator<Item = Direction> + '_ {
		Direction::ALL
			.into_iter()
			.filter(move |&d| self.has_node(pos.step(d)))
	}

	/// Number of present nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.iter().filter(|n| n.is_some()).count()
	}

	/// Every present node with its coordinate, row-major.
	pub fn nodes(&self) -> impl Iterator<Item = (GridPos, Point)> + '_ {
		let cols = self.cols.max(1);
		self.nodes.iter().enumerate().filter_map(move |(i, n)| {
			(*n).map(|p| (GridPos::new((i / cols) as i32, (i % cols) as i32), p))
		})
	}

	/// Every link between horizontally or vertically adjacent present nodes.
	pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
		self.nodes().flat_map(move |(pos, p)| {
			[Direction::Right, Direction::Down]
				.into_iter()
				.filter_map(move |d| self.node(pos.step(d)).map(|q| (p, q)))
		})
	}
}

/// `ceil(extent / spacing)`, zero for empty or invalid extents.
fn span_count(extent: f64, spacing: f64) -> usize {
	if !extent.is_finite() || extent <= 0.0 || spacing <= 0.0 {
		return 0;
	}
	(extent / spacing).ceil() as usize
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn square_canvas_gets_eleven_by_eleven() {
		let grid = Grid::build(520.0, 520.0, 52.0, None);
		assert_eq!((grid.rows(), grid.cols()), (11, 11));
		assert_eq!(grid.node(GridPos::new(0, 0)), Some(Point::new(0.0, 0.0)));
		assert_eq!(grid.node(GridPos::new(10, 10)), Some(Point::new(520.0, 520.0)));
		assert_eq!(grid.node_count(), 121);
	}

	#[test]
	fn uneven_canvas_is_centred_with_overhang() {
		let grid = Grid::build(500.0, 300.0, 52.0, None);
		assert_eq!((grid.rows(), grid.cols()), (7, 11));
		let first = grid.node(GridPos::new(0, 0)).unwrap();
		let last = grid.node(GridPos::new(6, 10)).unwrap();
		assert!(first.x <= 0.0 && first.y <= 0.0);
		assert!(last.x >= 500.0 && last.y >= 300.0);
		assert!((first.x + last.x - 500.0).abs() < 1e-9);
		assert!((first.y + last.y - 300.0).abs() < 1e-9);
	}

	#[test]
	fn zone_punches_holes() {
		let zone = Zone {
			rect: Rect::new(100.0, 100.0, 120.0, 120.0),
		};
		let grid = Grid::build(520.0, 520.0, 52.0, Some(&zone));
		// 104, 156 and 208 fall inside on both axes.
		assert_eq!(grid.node_count(), 121 - 9);
		assert!(!grid.has_node(GridPos::new(2, 2)));
		assert!(!grid.has_node(GridPos::new(4, 4)));
		assert!(grid.has_node(GridPos::new(1, 2)));
		assert!(grid.has_node(GridPos::new(5, 4)));
	}

	#[test]
	fn zone_from_bounds_is_container_local() {
		let zone = Zone::from_bounds(
			Rect::new(10.0, 20.0, 800.0, 600.0),
			Rect::new(110.0, 220.0, 300.0, 100.0),
			30.0,
		);
		assert_eq!(zone.rect, Rect::new(70.0, 170.0, 360.0, 160.0));
		assert!(zone.contains(Point::new(70.0, 170.0)));
		assert!(!zone.contains(Point::new(69.9, 200.0)));
	}

	#[test]
	fn lookups_off_the_lattice_are_absent() {
		let grid = Grid::build(104.0, 104.0, 52.0, None);
		assert!(grid.node(GridPos::new(-1, 0)).is_none());
		assert!(grid.node(GridPos::new(0, 3)).is_none());
		let corner: Vec<_> = grid.exits(GridPos::new(0, 0)).collect();
		assert_eq!(corner, vec![Direction::Right, Direction::Down]);
	}

	#[test]
	fn edges_link_adjacent_present_nodes() {
		// 3x3 lattice: 6 horizontal + 6 vertical links.
		let grid = Grid::build(104.0, 104.0, 52.0, None);
		assert_eq!(grid.edges().count(), 12);

		let zone = Zone {
			rect: Rect::new(50.0, 50.0, 4.0, 4.0),
		};
		let holed = Grid::build(104.0, 104.0, 52.0, Some(&zone));
		assert!(!holed.has_node(GridPos::new(1, 1)));
		assert_eq!(holed.edges().count(), 8);
	}

	#[test]
	fn empty_canvas_still_has_one_node() {
		let grid = Grid::build(0.0, 0.0, 52.0, None);
		assert_eq!((grid.rows(), grid.cols()), (1, 1));
		assert_eq!(grid.exits(GridPos::new(0, 0)).count(), 0);
	}

	#[test]
	fn perpendicular_turns() {
		assert_eq!(
			Direction::Right.perpendicular(),
			[Direction::Down, Direction::Up]
		);
		assert_eq!(
			Direction::Up.perpendicular(),
			[Direction::Right, Direction::Left]
		);
		assert_eq!(GridPos::new(2, 2).step(Direction::Right), GridPos::new(2, 3));
	}
}
