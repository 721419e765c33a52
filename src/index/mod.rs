mod linear;
mod tree;

pub use linear::LinearIndex;
pub use tree::{IndexEntry, RegionTreeParams, TreeIndex, DEGENERATE_EPSILON};

use std::fmt::Debug;
use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::math::Point2;
use crate::shape::Shape;

/// Containment queries over a mutable collection of shapes.
///
/// Shapes are shared with the caller through `Arc` and never modified by
/// the index. Mutations take an exclusive lock; queries share a read lock.
pub trait ShapeIndex: Send + Sync + Debug {
    /// Inserts a shape. Duplicates are not detected.
    fn add_shape(&self, shape: Arc<Shape>);

    /// Inserts several shapes under one lock.
    fn add_shapes(&self, shapes: Vec<Arc<Shape>>);

    /// Returns the first shape with the given name.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::NotFound` if no shape has that name.
    fn shape_by_name(&self, name: &str) -> Result<Arc<Shape>>;

    /// Detaches and returns the first shape with the given name.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::NotFound` if no shape has that name.
    fn remove_shape_by_name(&self, name: &str) -> Result<Arc<Shape>>;

    /// All shapes containing `point`, boundary included. Order is unspecified.
    fn shapes_containing_point(&self, point: &Point2) -> Vec<Arc<Shape>>;

    /// All shapes that `query` fits inside. Order is unspecified.
    fn shapes_containing_shape(&self, query: &Shape) -> Vec<Arc<Shape>>;

    /// Snapshot of every indexed shape.
    fn shapes(&self) -> Vec<Arc<Shape>>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which index structure [`build_index`] creates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndexStrategy {
    /// Plain list, every query scans all shapes.
    Linear,
    /// R*-tree over bounding boxes with [`RegionTreeParams`] fan-out.
    #[default]
    Tree,
}

/// Parameters for building an index.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexConfig {
    pub strategy: IndexStrategy,
}

impl IndexConfig {
    #[must_use]
    pub fn with_strategy(mut self, strategy: IndexStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Builds an index over `shapes` using the configured strategy.
#[must_use]
pub fn build_index<I>(shapes: I, config: &IndexConfig) -> Box<dyn ShapeIndex>
where
    I: IntoIterator<Item = Arc<Shape>>,
{
    let shapes: Vec<_> = shapes.into_iter().collect();
    debug!(strategy = ?config.strategy, shapes = shapes.len(), "building shape index");
    match config.strategy {
        IndexStrategy::Linear => {
            let index = LinearIndex::new();
            index.add_shapes(shapes);
            Box::new(index)
        }
        IndexStrategy::Tree => Box::new(TreeIndex::<RegionTreeParams>::bulk_load(shapes)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{IndexError, RegionError};
    use crate::shape::{Circle, Polygon};
    use proptest::prelude::*;

    const STRATEGIES: [IndexStrategy; 2] = [IndexStrategy::Linear, IndexStrategy::Tree];

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn rect(name: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> Arc<Shape> {
        let ring = [p(x0, y0), p(x1, y0), p(x1, y1), p(x0, y1)];
        Arc::new(Polygon::new(name, &ring).unwrap().into())
    }

    fn circle(name: &str, x: f64, y: f64, r: f64) -> Arc<Shape> {
        Arc::new(Circle::new(name, p(x, y), r).unwrap().into())
    }

    fn names(shapes: &[Arc<Shape>]) -> Vec<String> {
        let mut names: Vec<_> = shapes.iter().map(|s| s.name().to_owned()).collect();
        names.sort();
        names
    }

    fn sample_shapes() -> Vec<Arc<Shape>> {
        vec![
            rect("A", 0.0, 0.0, 10.0, 10.0),
            rect("B", 5.0, 5.0, 20.0, 20.0),
            circle("C", 3.0, 3.0, 2.0),
            circle("D", 50.0, 50.0, 30.0),
        ]
    }

    #[test]
    fn single_square_point_queries() {
        init_tracing();
        for strategy in STRATEGIES {
            let index = build_index(
                [rect("A", 0.0, 0.0, 10.0, 10.0)],
                &IndexConfig::default().with_strategy(strategy),
            );
            assert_eq!(names(&index.shapes_containing_point(&p(5.0, 5.0))), ["A"]);
            assert!(index.shapes_containing_point(&p(50.0, 50.0)).is_empty());
        }
    }

    #[test]
    fn point_queries_match_exact_tests() {
        for strategy in STRATEGIES {
            let index = build_index(sample_shapes(), &IndexConfig { strategy });
            assert_eq!(
                names(&index.shapes_containing_point(&p(3.0, 3.0))),
                ["A", "C"]
            );
            assert_eq!(
                names(&index.shapes_containing_point(&p(7.0, 7.0))),
                ["A", "B"]
            );
            assert_eq!(
                names(&index.shapes_containing_point(&p(20.0, 20.0))),
                ["B"]
            );
            assert_eq!(names(&index.shapes_containing_point(&p(45.0, 40.0))), ["D"]);
            // Inside D's bounding box, outside the disc.
            assert!(index.shapes_containing_point(&p(78.0, 78.0)).is_empty());
        }
    }

    #[test]
    fn shape_queries_compare_against_the_query() {
        for strategy in STRATEGIES {
            let index = build_index(sample_shapes(), &IndexConfig { strategy });

            let small = rect("q", 6.0, 6.0, 8.0, 8.0);
            assert_eq!(names(&index.shapes_containing_shape(&small)), ["A", "B"]);

            let disc = circle("q", 2.0, 2.0, 1.0);
            assert_eq!(names(&index.shapes_containing_shape(&disc)), ["A"]);

            let inner_disc = circle("q", 3.0, 3.0, 0.5);
            assert_eq!(names(&index.shapes_containing_shape(&inner_disc)), ["A", "C"]);

            let far = rect("q", 200.0, 200.0, 201.0, 201.0);
            assert!(index.shapes_containing_shape(&far).is_empty());
        }
    }

    #[test]
    fn lookup_and_removal() {
        for strategy in STRATEGIES {
            let index = build_index(sample_shapes(), &IndexConfig { strategy });
            assert_eq!(index.len(), 4);
            assert_eq!(index.shape_by_name("C").unwrap().name(), "C");

            let removed = index.remove_shape_by_name("C").unwrap();
            assert_eq!(removed.name(), "C");
            assert_eq!(index.len(), 3);
            assert!(matches!(
                index.shape_by_name("C"),
                Err(RegionError::Index(IndexError::NotFound(ref n))) if n == "C"
            ));
            assert!(matches!(
                index.remove_shape_by_name("C"),
                Err(RegionError::Index(IndexError::NotFound(_)))
            ));
            assert_eq!(names(&index.shapes_containing_point(&p(3.0, 3.0))), ["A"]);
        }
    }

    #[test]
    fn duplicates_are_kept_and_removed_one_at_a_time() {
        for strategy in STRATEGIES {
            let index = build_index(Vec::<Arc<Shape>>::new(), &IndexConfig { strategy });
            assert!(index.is_empty());
            index.add_shape(rect("dup", 0.0, 0.0, 1.0, 1.0));
            index.add_shape(rect("dup", 0.0, 0.0, 2.0, 2.0));
            assert_eq!(index.shapes_containing_point(&p(0.5, 0.5)).len(), 2);
            index.remove_shape_by_name("dup").unwrap();
            assert_eq!(index.len(), 1);
            index.remove_shape_by_name("dup").unwrap();
            assert!(index.is_empty());
        }
    }

    #[test]
    fn zero_radius_circle_is_findable_in_tree() {
        let index = TreeIndex::new();
        index.add_shape(circle("dot", 4.0, 4.0, 0.0));
        assert_eq!(names(&index.shapes_containing_point(&p(4.0, 4.0))), ["dot"]);
        assert!(index.shapes_containing_point(&p(4.0, 4.1)).is_empty());
    }

    #[test]
    fn tree_grows_past_one_node() {
        let index = TreeIndex::new();
        let shapes: Vec<_> = (0..200_i32)
            .map(|i| {
                let x = f64::from(i % 20) * 10.0;
                let y = f64::from(i / 20) * 10.0;
                rect(&format!("cell-{i}"), x, y, x + 9.0, y + 9.0)
            })
            .collect();
        index.add_shapes(shapes);
        assert_eq!(index.len(), 200);
        assert_eq!(
            names(&index.shapes_containing_point(&p(125.0, 34.0))),
            ["cell-72"]
        );
        assert!(index.shapes_containing_point(&p(129.5, 34.0)).is_empty());
        index.remove_shape_by_name("cell-72").unwrap();
        assert!(index.shapes_containing_point(&p(125.0, 34.0)).is_empty());
    }

    #[test]
    fn concurrent_reads_and_writes() {
        let index: Arc<dyn ShapeIndex> = Arc::from(build_index(
            sample_shapes(),
            &IndexConfig::default(),
        ));
        std::thread::scope(|scope| {
            for t in 0..4_i32 {
                let index = Arc::clone(&index);
                scope.spawn(move || {
                    for i in 0..50_i32 {
                        let x = f64::from(t * 100 + i) + 1000.0;
                        index.add_shape(rect(&format!("w{t}-{i}"), x, 0.0, x + 0.5, 0.5));
                        assert!(!index.shapes_containing_point(&p(3.0, 3.0)).is_empty());
                    }
                });
            }
        });
        assert_eq!(index.len(), 4 + 4 * 50);
    }

    #[derive(Debug, Clone)]
    enum ShapeSpec {
        Rect(i32, i32, i32, i32),
        Disc(i32, i32, i32),
    }

    fn shape_spec() -> impl Strategy<Value = ShapeSpec> {
        prop_oneof![
            (0..40, 0..40, 1..15, 1..15).prop_map(|(x, y, w, h)| ShapeSpec::Rect(x, y, w, h)),
            (0..40, 0..40, 0..10).prop_map(|(x, y, r)| ShapeSpec::Disc(x, y, r)),
        ]
    }

    fn materialize(specs: &[ShapeSpec]) -> Vec<Arc<Shape>> {
        specs
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let name = format!("s{i}");
                match *spec {
                    ShapeSpec::Rect(x, y, w, h) => {
                        let (x, y) = (f64::from(x), f64::from(y));
                        rect(&name, x, y, x + f64::from(w), y + f64::from(h))
                    }
                    ShapeSpec::Disc(x, y, r) => {
                        circle(&name, f64::from(x), f64::from(y), f64::from(r))
                    }
                }
            })
            .collect()
    }

    proptest! {
        #[test]
        fn strategies_agree_with_exact_point_tests(
            specs in prop::collection::vec(shape_spec(), 0..80),
            points in prop::collection::vec((-5.0..60.0f64, -5.0..60.0f64), 1..20),
        ) {
            let shapes = materialize(&specs);
            let linear = build_index(shapes.clone(), &IndexConfig { strategy: IndexStrategy::Linear });
            let tree = build_index(shapes.clone(), &IndexConfig { strategy: IndexStrategy::Tree });

            for (x, y) in points {
                let q = p(x, y);
                let expected: Vec<Arc<Shape>> = shapes
                    .iter()
                    .filter(|s| s.point_inside(&q))
                    .cloned()
                    .collect();
                prop_assert_eq!(names(&linear.shapes_containing_point(&q)), names(&expected));
                prop_assert_eq!(names(&tree.shapes_containing_point(&q)), names(&expected));
            }
        }

        #[test]
        fn strategies_agree_on_circle_queries(
            specs in prop::collection::vec(shape_spec(), 0..80),
            queries in prop::collection::vec((0..40, 0..40, 0..6), 1..10),
        ) {
            let shapes = materialize(&specs);
            let linear = build_index(shapes.clone(), &IndexConfig { strategy: IndexStrategy::Linear });
            let tree = build_index(shapes.clone(), &IndexConfig { strategy: IndexStrategy::Tree });

            for (x, y, r) in queries {
                let query: Shape = Circle::new("q", p(f64::from(x), f64::from(y)), f64::from(r))
                    .unwrap()
                    .into();
                let expected: Vec<Arc<Shape>> = shapes
                    .iter()
                    .filter(|s| s.shape_inside(&query))
                    .cloned()
                    .collect();
                prop_assert_eq!(names(&linear.shapes_containing_shape(&query)), names(&expected));
                prop_assert_eq!(names(&tree.shapes_containing_shape(&query)), names(&expected));
            }
        }
    }
}
