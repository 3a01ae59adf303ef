//! Hexagonal grid navigation: a large hexagon tiled with rings of smaller
//! hexagonal cells, random vertices inside the hexagonal prism, and the
//! sequential vertex tables used to build look-up tables.
use std::f64::consts::FRAC_PI_3;
use std::iter::FusedIterator;

use glam::{DMat3, DVec3};
use rand::RngCore;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::geometry::random::{rand01, symmetric, uniform_in_range};
use crate::geometry::Placement;
use crate::sampling::{unknown_region, Region, VertexSampling};

const NAME: &str = "HexagonNavigator";
const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Default depth of the `PLANE` slab below the `+z` face, in length units (mm).
pub const DEFAULT_PLANE_DEPTH: f64 = 20.0;

/// Hexagonal prism navigator.
///
/// The hexagon has its vertices at multiples of 60° starting on the +X axis,
/// so its apothem lies along ±Y.
#[derive(Debug, Clone)]
pub struct HexagonNavigator {
    outer_radius: f64,
    half_length: f64,
    apothem: f64,
    element_radius: f64,
    ring_order: u32,
    cell_count: u64,
    plane_depth: f64,
    placement: Placement,
}

impl HexagonNavigator {
    /// Create a navigator and size its grid for cells close to `element_radius`.
    pub fn new(outer_radius: f64, half_length: f64, element_radius: f64) -> Self {
        debug_assert!(outer_radius > 0.0, "outer radius must be > 0");
        debug_assert!(half_length >= 0.0, "half length must be >= 0");
        debug_assert!(element_radius > 0.0, "element radius must be > 0");

        let mut navigator = Self {
            outer_radius,
            half_length,
            apothem: outer_radius * SQRT_3 / 2.0,
            element_radius,
            ring_order: 0,
            cell_count: 1,
            plane_depth: DEFAULT_PLANE_DEPTH,
            placement: Placement::IDENTITY,
        };
        navigator.resize_grid(element_radius);
        navigator
    }

    pub fn try_new(outer_radius: f64, half_length: f64, element_radius: f64) -> Result<Self> {
        if !(outer_radius.is_finite() && outer_radius > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "{NAME}: outer radius must be finite and > 0, got {outer_radius}"
            )));
        }
        if !(half_length.is_finite() && half_length >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "{NAME}: half length must be finite and >= 0, got {half_length}"
            )));
        }
        if !(element_radius.is_finite() && element_radius > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "{NAME}: element radius must be finite and > 0, got {element_radius}"
            )));
        }
        Ok(Self::new(outer_radius, half_length, element_radius))
    }

    /// Thickness of the `PLANE` slab, measured down from `z = +half_length`.
    pub fn with_plane_depth(mut self, depth: f64) -> Self {
        debug_assert!(depth >= 0.0, "plane depth must be >= 0");
        self.plane_depth = depth;
        self
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_rotation(mut self, rotation: DMat3) -> Self {
        self.placement.rotation = Some(rotation);
        self
    }

    pub fn with_origin(mut self, origin: DVec3) -> Self {
        self.placement.origin = origin;
        self
    }

    /// Re-tile the hexagon for cells close to `element_radius`.
    ///
    /// The ring order is the largest that fits the apothem, and the element
    /// radius is then stretched so the rings fill it exactly:
    /// `apothem == element_radius * (1 + 1.5 * ring_order)`.
    pub fn resize_grid(&mut self, element_radius: f64) {
        let order = (2.0 * (self.apothem / element_radius - 1.0) / 3.0).floor();
        self.ring_order = if order > 0.0 { order as u32 } else { 0 };

        // Sum of 6^i over the rings, not the centered hexagonal number 1 + 3k(k + 1).
        // Saturates at u64::MAX from ring 25 on.
        let mut cell_count = 0u64;
        for i in 0..=self.ring_order {
            cell_count = cell_count.saturating_add(6u64.saturating_pow(i));
            if cell_count == u64::MAX {
                break;
            }
        }
        self.cell_count = cell_count;

        self.element_radius = self.apothem / (1.0 + 1.5 * self.ring_order as f64);

        debug!(
            ring_order = self.ring_order,
            cell_count = self.cell_count,
            element_radius = self.element_radius,
            "hexagon grid resized"
        );
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn half_length(&self) -> f64 {
        self.half_length
    }

    pub fn apothem(&self) -> f64 {
        self.apothem
    }

    pub fn element_radius(&self) -> f64 {
        self.element_radius
    }

    pub fn ring_order(&self) -> u32 {
        self.ring_order
    }

    pub fn cell_count(&self) -> u64 {
        self.cell_count
    }

    pub fn plane_depth(&self) -> f64 {
        self.plane_depth
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Centre of the cell at axial lattice coordinates `(row, col)`, local frame.
    pub fn cell_position(&self, row: i32, col: i32) -> DVec3 {
        let r = self.element_radius;
        DVec3::new(
            r * SQRT_3 / 2.0 * (f64::from(row) - f64::from(col)),
            r * 1.5 * (f64::from(row) + f64::from(col)),
            0.0,
        )
    }

    /// Vertex in the local frame.
    pub fn generate_local(&self, region: Region, rng: &mut dyn RngCore) -> Result<DVec3> {
        match region {
            Region::Center => Ok(DVec3::ZERO),
            Region::Inside => Ok(self.inside_point(rng)),
            Region::Plane => Ok(self.plane_point(rng)),
            Region::Table => Err(Error::SequentialRegion {
                sampler: NAME,
                region: region.to_string(),
            }),
            other => Err(unknown_region(NAME, other)),
        }
    }

    fn inside_point(&self, rng: &mut dyn RngCore) -> DVec3 {
        let mut point = self.triangle_point(rng);
        point.z = symmetric(rng, self.half_length);
        sector_rotation(rng) * point
    }

    /// Slab of `plane_depth` under the `+z` face: triangle, then sector, then z.
    fn plane_point(&self, rng: &mut dyn RngCore) -> DVec3 {
        let triangle = self.triangle_point(rng);
        let point = sector_rotation(rng) * triangle;
        let low = (self.half_length - self.plane_depth).max(-self.half_length);
        DVec3::new(point.x, point.y, uniform_in_range(rng, low, self.half_length))
    }

    /// Uniform point of the triangle between the centre and the hexagon
    /// vertices at 0° and 60°, at `z = 0`.
    fn triangle_point(&self, rng: &mut dyn RngCore) -> DVec3 {
        let b = DVec3::new(self.outer_radius, 0.0, 0.0);
        let c = DVec3::new(
            self.outer_radius * FRAC_PI_3.cos(),
            self.outer_radius * FRAC_PI_3.sin(),
            0.0,
        );

        let mut u1 = rand01(rng);
        let mut u2 = rand01(rng);
        if u1 + u2 >= 1.0 {
            u1 = 1.0 - u1;
            u2 = 1.0 - u2;
        }
        let w = 1.0 - u1 - u2;

        // The centre vertex carries weight u1 and contributes nothing.
        u2 * b + w * c
    }

    /// Lattice of look-up-table points over the wedge between the 30° line
    /// `y = x / sqrt(3)` and the apothem.
    ///
    /// Column `k` sits at `x = 2 k binning` (while `x <= R / 2`) and starts from
    /// `y0 = k binning / cos(30°)`, a point on the 30° line. Each column then
    /// emits `y0 + binning, y0 + 2 binning, ...` for as long as the previous
    /// ordinate was within the apothem, so the start point itself is never
    /// emitted and the last vertex of a column may lie up to one step beyond
    /// the apothem.
    pub fn triangle_walk(&self, binning: f64, z: f64) -> Result<Vec<DVec3>> {
        if !(binning.is_finite() && binning > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "{NAME}: binning must be finite and > 0, got {binning}"
            )));
        }

        // Steps below the apothem's resolution would never leave a column.
        if binning <= self.apothem * f64::EPSILON {
            return Err(Error::InvalidConfig(format!(
                "{NAME}: binning {binning} is too small for apothem {}",
                self.apothem
            )));
        }

        let column_step = binning / (FRAC_PI_3 / 2.0).sin();
        let row_offset = binning / (FRAC_PI_3 / 2.0).cos();

        let mut vertices = Vec::new();
        let mut x = 0.0;
        let mut column = 0u32;
        while x <= self.outer_radius / 2.0 {
            let mut y = f64::from(column) * row_offset;
            column += 1;
            while y <= self.apothem {
                y += binning;
                vertices.push(DVec3::new(x, y, z));
            }
            x += column_step;
        }
        Ok(vertices)
    }

    /// Build the sequential table for a run of `number_events` events.
    ///
    /// Fails when the run is too short to visit every table vertex.
    pub fn vertex_table(&self, binning: f64, z: f64, number_events: usize) -> Result<VertexTable> {
        let vertices: Vec<DVec3> = self
            .triangle_walk(binning, z)?
            .into_iter()
            .map(|v| self.placement.apply(v))
            .collect();

        if number_events < vertices.len() {
            warn!(
                required = vertices.len(),
                configured = number_events,
                "number of events too small to generate tables"
            );
            return Err(Error::InsufficientEvents {
                required: vertices.len(),
                configured: number_events,
            });
        }
        Ok(VertexTable::new(vertices))
    }

    /// Centres of a honeycomb of cells with the given pitch (centre-to-centre
    /// distance), placed in the world frame.
    ///
    /// The central cell comes first; each ring `n` then contributes its `n`
    /// independent cells, each followed by its five 60° rotations.
    pub fn tessellate_with_fixed_pitch(&self, pitch: f64) -> Result<Vec<DVec3>> {
        if !(pitch.is_finite() && pitch > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "{NAME}: pitch must be finite and > 0, got {pitch}"
            )));
        }

        let cell_radius = pitch / SQRT_3;
        let cell_apothem = SQRT_3 / 2.0 * cell_radius;
        let order = (2.0 / 3.0 * (self.apothem / cell_radius - 1.0)).floor();
        let order = if order > 0.0 { order as u32 } else { 0 };

        let step = DMat3::from_rotation_z(FRAC_PI_3);
        let mut cells = Vec::with_capacity(1 + 3 * (order as usize) * (order as usize + 1));
        cells.push(self.placement.apply(DVec3::ZERO));

        for n in 1..=order {
            let n = f64::from(n);
            for i in 0..n as u32 {
                let mut position = DVec3::new(
                    -n * cell_apothem + f64::from(i) * 2.0 * cell_apothem,
                    n * 2.0 * cell_apothem * (FRAC_PI_3 / 2.0).cos(),
                    0.0,
                );
                cells.push(self.placement.apply(position));
                for _ in 0..5 {
                    position = step * position;
                    cells.push(self.placement.apply(position));
                }
            }
        }
        Ok(cells)
    }
}

/// Rotation by a uniformly chosen multiple of 60° about z.
fn sector_rotation(rng: &mut dyn RngCore) -> DMat3 {
    let sector = ((rand01(rng) * 6.0).floor() as u32).min(5);
    DMat3::from_rotation_z(f64::from(sector) * FRAC_PI_3)
}

impl VertexSampling for HexagonNavigator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn generate_vertex(&self, region: Region, rng: &mut dyn RngCore) -> Result<DVec3> {
        self.generate_local(region, rng)
            .map(|p| self.placement.apply(p))
    }
}

/// Finite, single-pass sequence of table vertices.
///
/// Each vertex is served once; afterwards the table reports exhaustion.
#[derive(Debug)]
pub struct VertexTable {
    vertices: Vec<DVec3>,
    cursor: usize,
}

impl VertexTable {
    pub fn new(vertices: Vec<DVec3>) -> Self {
        Self {
            vertices,
            cursor: 0,
        }
    }

    /// Total number of vertices in the table.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertices not yet served.
    pub fn remaining(&self) -> usize {
        self.vertices.len().saturating_sub(self.cursor)
    }

    /// Next vertex, or [`Error::TableExhausted`] once every vertex was served.
    pub fn next_vertex(&mut self) -> Result<DVec3> {
        self.next().ok_or_else(|| {
            warn!(len = self.vertices.len(), "vertex table exhausted");
            Error::TableExhausted {
                len: self.vertices.len(),
            }
        })
    }
}

impl Iterator for VertexTable {
    type Item = DVec3;

    fn next(&mut self) -> Option<DVec3> {
        let vertex = self.vertices.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(vertex)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for VertexTable {}

impl FusedIterator for VertexTable {}
