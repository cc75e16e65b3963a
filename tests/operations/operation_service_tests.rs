use proptest::prelude::*;

use tabulated::concurrent::synchronizedtabulatedfunction::SynchronizedTabulatedFunction;
use tabulated::function::tabulatedfunction::tabulatedfunction::TabulatedFunction;
use tabulated::function::tabulatedfunction::tabulatedfunctionfactory::TabulatedFunctionFactory;
use tabulated::operation::operationerror::OperationError;
use tabulated::operation::tabulatedfunctionoperationservice::TabulatedFunctionOperationService;

fn ys(function: &dyn TabulatedFunction) -> Vec<f64> {
    function.iter().map(|sample| sample.y()).collect()
}

#[test]
fn count_mismatch_is_inconsistent() {
    let service = TabulatedFunctionOperationService::default();
    let a = TabulatedFunctionFactory::Array.create(&[0.0, 1.0], &[1.0, 1.0]).unwrap();
    let b = TabulatedFunctionFactory::Array.create(&[0.0, 1.0, 2.0], &[1.0; 3]).unwrap();
    let err = service.add(&*a, &*b).unwrap_err();
    assert_eq!(err, OperationError::CountMismatch { left: 2, right: 3 });
    assert!(err.is_inconsistent());
}

#[test]
fn grid_mismatch_is_inconsistent() {
    let service = TabulatedFunctionOperationService::default();
    let a = TabulatedFunctionFactory::Array.create(&[0.0, 1.0, 2.0], &[1.0; 3]).unwrap();
    let b = TabulatedFunctionFactory::LinkedList.create(&[0.0, 1.5, 2.0], &[1.0; 3]).unwrap();
    let err = service.multiply(&*a, &*b).unwrap_err();
    assert_eq!(err, OperationError::GridMismatch { index: 1, left: 1.0, right: 1.5 });
    assert!(err.is_inconsistent());
}

#[test]
fn grids_equal_within_tolerance_combine() {
    let service = TabulatedFunctionOperationService::default();
    let a = TabulatedFunctionFactory::Array.create(&[0.0, 1.0], &[1.0, 2.0]).unwrap();
    let b = TabulatedFunctionFactory::Array.create(&[0.0, 1.0 + 5e-11], &[3.0, 4.0]).unwrap();
    let sum = service.add(&*a, &*b).unwrap();
    assert_eq!(sum.x(1).unwrap(), 1.0);
    assert_eq!(ys(&*sum), vec![4.0, 6.0]);
}

#[test]
fn division_guard_reports_offending_sample() {
    let service = TabulatedFunctionOperationService::new(TabulatedFunctionFactory::LinkedList);
    let a = TabulatedFunctionFactory::Array.create(&[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap();
    let b = TabulatedFunctionFactory::Array.create(&[0.0, 1.0, 2.0], &[2.0, 4.0, -5e-11]).unwrap();
    assert_eq!(
        service.divide(&*a, &*b).unwrap_err(),
        OperationError::DivisionByZero { index: 2, x: 2.0, denominator: -5e-11 }
    );
}

#[test]
fn inputs_are_left_untouched() {
    let service = TabulatedFunctionOperationService::default();
    let a = TabulatedFunctionFactory::LinkedList.create(&[0.0, 1.0], &[1.0, 2.0]).unwrap();
    let b = TabulatedFunctionFactory::Array.create(&[0.0, 1.0], &[3.0, 5.0]).unwrap();
    let mut result = service.subtract(&*a, &*b).unwrap();
    result.set_y(0, 100.0).unwrap();
    assert_eq!(ys(&*a), vec![1.0, 2.0]);
    assert_eq!(ys(&*b), vec![3.0, 5.0]);
}

#[test]
fn combine_takes_any_binary_op() {
    let service = TabulatedFunctionOperationService::default();
    let a = TabulatedFunctionFactory::Array.create(&[0.0, 1.0, 2.0], &[1.0, 5.0, 3.0]).unwrap();
    let b = TabulatedFunctionFactory::Array.create(&[0.0, 1.0, 2.0], &[4.0, 2.0, 3.0]).unwrap();
    let max = service.combine(&*a, &*b, f64::max).unwrap();
    assert_eq!(ys(&*max), vec![4.0, 5.0, 3.0]);
}

#[test]
fn sampled_points_with_repeated_x_still_combine() {
    let service = TabulatedFunctionOperationService::default();
    let a = TabulatedFunctionFactory::Array
        .create_from_function(&|x: f64| x, 1.0, 1.0, 3)
        .unwrap();
    let product = service.multiply(&*a, &*a).unwrap();
    assert_eq!(ys(&*product), vec![1.0; 3]);
}

proptest! {
    #[test]
    fn prop_factory_changes_representation_only(
        ys_a in prop::collection::vec(-1e3f64..1e3, 2..30),
        offset in 0.5f64..10.0
    ) {
        let xs: Vec<f64> = (0..ys_a.len()).map(|i| i as f64 * 0.5).collect();
        let ys_b: Vec<f64> = ys_a.iter().map(|y| y.abs() + offset).collect();
        let a = TabulatedFunctionFactory::Array.create(&xs, &ys_a).unwrap();
        let b = TabulatedFunctionFactory::LinkedList.create(&xs, &ys_b).unwrap();

        let array = TabulatedFunctionOperationService::new(TabulatedFunctionFactory::Array);
        let linked = TabulatedFunctionOperationService::new(TabulatedFunctionFactory::LinkedList);
        let from_array = array.divide(&*a, &*b).unwrap();
        let from_linked = linked.divide(&*a, &*b).unwrap();
        prop_assert_eq!(from_array.backend_name(), "ArrayTabulatedFunction");
        prop_assert_eq!(from_linked.backend_name(), "LinkedListTabulatedFunction");
        prop_assert_eq!(from_array.samples(), from_linked.samples());
        for i in 0..xs.len() {
            prop_assert_eq!(from_array.y(i).unwrap(), ys_a[i] / ys_b[i]);
        }
    }
}

#[test]
fn decorated_functions_are_accepted_as_operands() {
    let service = TabulatedFunctionOperationService::new(TabulatedFunctionFactory::LinkedList);
    let shared = SynchronizedTabulatedFunction::from_boxed(
        TabulatedFunctionFactory::Array.create(&[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap(),
    );
    let other = TabulatedFunctionFactory::Array.create(&[0.0, 1.0, 2.0], &[10.0, 20.0, 30.0]).unwrap();

    let sum = service.add(&shared, &*other).unwrap();
    assert_eq!(sum.backend_name(), "LinkedListTabulatedFunction");
    assert_eq!(ys(&*sum), vec![11.0, 22.0, 33.0]);

    let product = service.multiply(&*other, &shared).unwrap();
    assert_eq!(ys(&*product), vec![10.0, 40.0, 90.0]);
    assert_eq!(ys(&shared), vec![1.0, 2.0, 3.0]);
}
