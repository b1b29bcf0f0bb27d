use std::fmt;

use nalgebra::RealField;

use crate::disc::real;

/// A 1D interval `[p0, p1]`. Its two faces are the endpoints, with outward
/// normals -1 and +1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Element1d<T> {
    p0: T,
    p1: T,
}
impl<T: RealField + Copy> Element1d<T> {
    pub fn new(p0: T, p1: T) -> Self {
        debug_assert!(p0 < p1, "element endpoints must be increasing");
        Self { p0, p1 }
    }
    pub fn center(&self) -> T {
        (self.p1 + self.p0) / real(2.0)
    }
    pub fn measure(&self) -> T {
        self.p1 - self.p0
    }
    pub fn faces(&self) -> [T; 2] {
        [self.p0, self.p1]
    }
    pub fn points(&self) -> [T; 2] {
        [self.p0, self.p1]
    }
    pub fn normals(&self) -> [T; 2] {
        [-T::one(), T::one()]
    }
}
impl<T: fmt::Display> fmt::Display for Element1d<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Element [{}, {}]", self.p0, self.p1)
    }
}

/// Returns `howmany` equispaced points from the left to the right endpoint,
/// both included. A single point is placed at the center.
pub fn make_test_points<T: RealField + Copy>(elem: &Element1d<T>, howmany: usize) -> Vec<T> {
    match howmany {
        0 => Vec::new(),
        1 => vec![elem.center()],
        _ => {
            let [left, _] = elem.points();
            let step = elem.measure() / real((howmany - 1) as f64);
            (0..howmany)
                .map(|i| left + step * real(i as f64))
                .collect()
        }
    }
}

pub struct Mesh1d<T> {
    pub elements: Vec<Element1d<T>>,
}
impl<T: RealField + Copy> Mesh1d<T> {
    /// Uniform partition of [0, 1].
    pub fn uniform(elem_num: usize) -> Self {
        Self::uniform_on(elem_num, T::zero(), T::one())
    }
    pub fn uniform_on(elem_num: usize, left_coord: T, right_coord: T) -> Self {
        let length = right_coord - left_coord;
        let n: T = real(elem_num as f64);
        let elements = (0..elem_num)
            .map(|i| {
                let x0 = left_coord + length * real(i as f64) / n;
                let x1 = left_coord + length * real((i + 1) as f64) / n;
                Element1d::new(x0, x1)
            })
            .collect();
        Self { elements }
    }
    pub fn elem_num(&self) -> usize {
        self.elements.len()
    }
    /// Faces are shared between consecutive elements.
    pub fn face_num(&self) -> usize {
        self.elements.len() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_element_geometry() {
        let elem = Element1d::new(0.25, 0.75);
        assert_relative_eq!(elem.center(), 0.5);
        assert_relative_eq!(elem.measure(), 0.5);
        assert_eq!(elem.faces(), [0.25, 0.75]);
        assert_eq!(elem.normals(), [-1.0, 1.0]);
        assert_eq!(elem.to_string(), "Element [0.25, 0.75]");
    }

    #[test]
    fn test_uniform_mesh_is_contiguous() {
        let mesh = Mesh1d::<f64>::uniform(4);
        assert_eq!(mesh.elem_num(), 4);
        assert_eq!(mesh.face_num(), 5);
        assert_eq!(mesh.elements[0].points()[0], 0.0);
        assert_eq!(mesh.elements[3].points()[1], 1.0);
        for pair in mesh.elements.windows(2) {
            assert_eq!(pair[0].points()[1], pair[1].points()[0]);
        }
    }

    #[test]
    fn test_make_test_points() {
        let elem = Element1d::new(0.0, 0.5);
        let pts = make_test_points(&elem, 5);
        assert_eq!(pts.len(), 5);
        assert_relative_eq!(pts[0], 0.0);
        assert_relative_eq!(pts[2], 0.25);
        assert_relative_eq!(pts[4], 0.5);
        assert_eq!(make_test_points(&elem, 1), vec![0.25]);
        assert!(make_test_points(&elem, 0).is_empty());
    }
}
