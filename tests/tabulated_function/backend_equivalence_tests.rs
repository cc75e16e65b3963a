use proptest::prelude::*;

use tabulated::function::tabulatedfunction::tabulatedfunction::TabulatedFunction;
use tabulated::function::tabulatedfunction::tabulatedfunctionfactory::TabulatedFunctionFactory;

// Strictly increasing grids built from positive gaps.
fn grid() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (1usize..40).prop_flat_map(|len| {
        (
            -100.0f64..100.0,
            prop::collection::vec(0.01f64..10.0, len),
            prop::collection::vec(-1e3f64..1e3, len),
        )
            .prop_map(|(start, gaps, ys)| {
                let xs: Vec<f64> = gaps
                    .iter()
                    .scan(start, |x, gap| {
                        let current = *x;
                        *x += gap;
                        Some(current)
                    })
                    .collect();
                (xs, ys)
            })
    })
}

proptest! {
    #[test]
    fn prop_accessors_reproduce_inputs((xs, ys) in grid()) {
        for factory in [TabulatedFunctionFactory::Array, TabulatedFunctionFactory::LinkedList] {
            let function = factory.create(&xs, &ys).unwrap();
            prop_assert_eq!(function.count(), xs.len());
            for i in 0..xs.len() {
                prop_assert_eq!(function.x(i).unwrap(), xs[i]);
                prop_assert_eq!(function.y(i).unwrap(), ys[i]);
                prop_assert_eq!(function.index_of_x(xs[i]), Some(i));
            }
        }
    }

    #[test]
    fn prop_backends_are_indistinguishable((xs, ys) in grid(), probes in prop::collection::vec(-200.0f64..200.0, 1..20)) {
        let array = TabulatedFunctionFactory::Array.create(&xs, &ys).unwrap();
        let linked = TabulatedFunctionFactory::LinkedList.create(&xs, &ys).unwrap();
        prop_assert_eq!(array.samples(), linked.samples());
        for &x in probes.iter() {
            prop_assert_eq!(array.floor_index_of_x(x), linked.floor_index_of_x(x));
            prop_assert_eq!(array.evaluate(x).unwrap(), linked.evaluate(x).unwrap());
        }
    }

    #[test]
    fn prop_evaluate_hits_knots((xs, ys) in grid()) {
        let function = TabulatedFunctionFactory::LinkedList.create(&xs, &ys).unwrap();
        for i in 0..xs.len() {
            let value = function.evaluate(xs[i]).unwrap();
            prop_assert!((value - ys[i]).abs() <= 1e-9 * (1.0 + ys[i].abs()), "knot {}: {} vs {}", i, value, ys[i]);
        }
    }
}
