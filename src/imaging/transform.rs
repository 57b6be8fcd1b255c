//! Affine transform engine for arbitrary-angle rotation.
//!
//! A rotation is expressed as two pieces of data: the affine map that rotates
//! the source about its own center, and the axis-aligned bounding box of the
//! mapped source corners. The bounding box is the exact size the destination
//! buffer must have to losslessly contain the rotated source; the placement
//! transform re-centers the rotated source inside it.
//!
//! Composition order is load-bearing: the center translation is applied
//! *before* the rotation. [`RotationTransform::for_source`] encodes that
//! order structurally so callers cannot get it backwards.

/// A 2×3 affine map `(x, y) -> (a·x + b·y + c, d·x + e·y + f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    m: [f32; 6],
}

impl Affine {
    pub fn identity() -> Self {
        Self {
            m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        }
    }

    pub fn translation(tx: f32, ty: f32) -> Self {
        Self {
            m: [1.0, 0.0, tx, 0.0, 1.0, ty],
        }
    }

    /// Rotation about the origin by `degrees`.
    pub fn rotation_degrees(degrees: f32) -> Self {
        let theta = degrees.to_radians();
        let (sin, cos) = theta.sin_cos();
        Self {
            m: [cos, -sin, 0.0, sin, cos, 0.0],
        }
    }

    /// Compose so that `self` is applied first, then `next`.
    pub fn then(self, next: Affine) -> Affine {
        let [sa, sb, sc, sd, se, sf] = self.m;
        let [na, nb, nc, nd, ne, nf] = next.m;
        Affine {
            m: [
                na * sa + nb * sd,
                na * sb + nb * se,
                na * sc + nb * sf + nc,
                nd * sa + ne * sd,
                nd * sb + ne * se,
                nd * sc + ne * sf + nf,
            ],
        }
    }

    pub fn apply(&self, point: (f32, f32)) -> (f32, f32) {
        let (x, y) = point;
        let [a, b, c, d, e, f] = self.m;
        (a * x + b * y + c, d * x + e * y + f)
    }

    /// Row-major coefficients `[a, b, c, d, e, f]` of the 2×3 matrix.
    pub fn coefficients(&self) -> [f32; 6] {
        self.m
    }
}

/// A centered rotation plus the bounding box of its result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationTransform {
    map: Affine,
    width: u32,
    height: u32,
}

impl RotationTransform {
    /// Build the rotation for a `width`×`height` source rotated by
    /// `angle_degrees`.
    ///
    /// The map translates the source center to the origin (integer-halved
    /// center, matching the crop arithmetic elsewhere) and then rotates.
    /// The bounding box is the rounded axis-aligned extent of the four
    /// mapped source corners.
    pub fn for_source(width: u32, height: u32, angle_degrees: f32) -> Self {
        let cx = (width / 2) as f32;
        let cy = (height / 2) as f32;
        let map =
            Affine::translation(-cx, -cy).then(Affine::rotation_degrees(angle_degrees));

        let w = width as f32;
        let h = height as f32;
        let corners = [(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)];

        let mut min_x = f32::MAX;
        let mut min_y = f32::MAX;
        let mut max_x = f32::MIN;
        let mut max_y = f32::MIN;
        for corner in corners {
            let (x, y) = map.apply(corner);
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        Self {
            map,
            width: (max_x - min_x).round() as u32,
            height: (max_y - min_y).round() as u32,
        }
    }

    /// Bounding-box width the destination buffer must have.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Bounding-box height the destination buffer must have.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The full source-to-destination map: centered rotation, then a
    /// translation into the center of the bounding-box buffer.
    pub fn placement(&self) -> Affine {
        self.map.then(Affine::translation(
            (self.width / 2) as f32,
            (self.height / 2) as f32,
        ))
    }
}
