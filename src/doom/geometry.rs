//! Grid geometry: maps an arbitrary pixel surface onto a fixed-budget fire grid

/// Number of cells along the bounded axis of every grid
pub const BOUNDED_AXIS_CELLS: u32 = 50;

/// Shape of the fire grid derived from a drawable surface.
///
/// One axis always holds `BOUNDED_AXIS_CELLS` cells; the other is stretched so
/// square cells of `cell_size` pixels cover the whole surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct GridGeometry {
    pub source_width: u32,
    pub source_height: u32,
    pub taller_than_wide: bool,
    pub cell_size: u32,
    pub grid_width: u32,
    pub grid_height: u32,
}

/// Pixel rectangle covered by one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

impl GridGeometry {
    /// Resolve the grid for a surface of `width` x `height` pixels.
    ///
    /// A zero dimension produces a zero-cell (inert) grid instead of failing.
    pub fn resolve(width: u32, height: u32) -> Self {
        let taller_than_wide = width < height;
        let bounded_axis = if taller_than_wide { width } else { height };
        let cell_size = bounded_axis.div_ceil(BOUNDED_AXIS_CELLS);

        let cells_along = |length: u32| {
            if cell_size == 0 {
                0
            } else {
                length.div_ceil(cell_size)
            }
        };

        let grid_width = if taller_than_wide {
            BOUNDED_AXIS_CELLS
        } else {
            cells_along(width)
        };
        let grid_height = if !taller_than_wide {
            BOUNDED_AXIS_CELLS
        } else {
            cells_along(height)
        };

        Self {
            source_width: width,
            source_height: height,
            taller_than_wide,
            cell_size,
            grid_width,
            grid_height,
        }
    }

    /// Total number of cells in the grid
    pub fn cell_count(&self) -> usize {
        self.grid_width as usize * self.grid_height as usize
    }

    /// True when the grid holds no cells and the simulation does nothing
    pub fn is_inert(&self) -> bool {
        self.cell_count() == 0
    }

    /// Flat row-major index of a cell
    #[inline]
    pub fn index(&self, column: u32, row: u32) -> usize {
        column as usize + self.grid_width as usize * row as usize
    }

    /// Index of the first cell in the bottom (source) row
    pub fn source_row_start(&self) -> usize {
        self.cell_count().saturating_sub(self.grid_width as usize)
    }

    /// Exclusive upper bound of the per-tick decay draw.
    /// Tall grids burn out faster relative to their length.
    pub fn decay_range(&self) -> u32 {
        if self.taller_than_wide {
            2
        } else {
            3
        }
    }

    /// Pixel rectangle on the source surface for a grid cell
    pub fn cell_rect(&self, column: u32, row: u32) -> CellRect {
        CellRect {
            x: column * self.cell_size,
            y: row * self.cell_size,
            size: self.cell_size,
        }
    }
}
