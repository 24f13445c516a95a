use std::ops::{Add, Index, IndexMut, Mul, Sub};

use nalgebra::{Point3, Vector3};
use num_traits::One;

use super::FloatType;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Triangle<Point>([Point; 3]);

impl<Point> Triangle<Point> {
    pub fn new(a: Point, b: Point, c: Point) -> Triangle<Point> {
        Triangle([a, b, c])
    }

    pub fn iter<'a>(&'a self) -> impl Iterator<Item = &'a Point> {
        self.0.iter()
    }

    pub fn map<Point2, F: FnMut(&Point) -> Point2>(&self, mut f: F) -> Triangle<Point2> {
        Triangle([f(&self[0]), f(&self[1]), f(&self[2])])
    }
}

impl<Point: Default> Default for Triangle<Point> {
    fn default() -> Self {
        Triangle([Default::default(), Default::default(), Default::default()])
    }
}

impl<Point> Index<usize> for Triangle<Point> {
    type Output = Point;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<Point> IndexMut<usize> for Triangle<Point> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl Triangle<Point3<FloatType>> {
    /// Returns edge vectors, coming from self[0]
    pub fn edges(&self) -> [Vector3<FloatType>; 2] {
        [self.0[1] - self.0[0], self.0[2] - self.0[0]]
    }

    /// Returns a normal vector of the triangle, not normalized.
    /// Zero for degenerate triangles.
    pub fn normal(&self) -> Vector3<FloatType> {
        let [e1, e2] = self.edges();
        e1.cross(&e2)
    }
}

/// Position within a triangle, as weights of the second (`u`) and third (`v`) vertex.
/// The first vertex has weight `1 - u - v`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BarycentricCoordinates<T> {
    pub u: T,
    pub v: T,
}

impl<T> BarycentricCoordinates<T>
where
    T: One + Copy + Sub<Output = T>,
{
    pub fn interpolate<T2>(&self, a: &T2, b: &T2, c: &T2) -> T2
    where
        for<'a> &'a T2: Mul<T, Output = T2>,
        T2: Add<Output = T2>,
    {
        let w = T::one() - self.u - self.v;
        a * w + b * self.u + c * self.v
    }

    pub fn interpolate_triangle<T2>(&self, triangle: &Triangle<T2>) -> T2
    where
        for<'a> &'a T2: Mul<T, Output = T2>,
        T2: Add<Output = T2>,
    {
        self.interpolate(&triangle[0], &triangle[1], &triangle[2])
    }
}
