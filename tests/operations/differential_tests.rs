use std::sync::Arc;
use std::thread;

use tabulated::concurrent::synchronizedtabulatedfunction::SynchronizedTabulatedFunction;
use tabulated::function::mathfunction::{
    MathFunction,
    SqrFunction
};
use tabulated::function::tabulatedfunction::arraytabulatedfunction::ArrayTabulatedFunction;
use tabulated::function::tabulatedfunction::tabulatedfunction::TabulatedFunction;
use tabulated::function::tabulatedfunction::tabulatedfunctionfactory::TabulatedFunctionFactory;
use tabulated::operation::differentialoperator::DifferentialOperator;
use tabulated::operation::steppingdifferentialoperator::SteppingDifferentialOperator;
use tabulated::operation::tabulateddifferentialoperator::TabulatedDifferentialOperator;

const GRID: [f64; 5] = [0.0, 1.0, 2.0, 3.0, 4.0];

fn ys(function: &dyn TabulatedFunction) -> Vec<f64> {
    function.iter().map(|sample| sample.y()).collect()
}

#[test]
fn derivative_of_linear_function_is_constant() {
    let values: Vec<f64> = GRID.iter().map(|x| 2.0 * x + 1.0).collect();
    for factory in [TabulatedFunctionFactory::Array, TabulatedFunctionFactory::LinkedList] {
        let function = factory.create(&GRID, &values).unwrap();
        let derivative = TabulatedDifferentialOperator::new(factory).derive(&*function).unwrap();
        let slopes = ys(&*derivative);
        assert_eq!(&slopes[..4], &[2.0; 4]);
        assert_eq!(slopes[4], slopes[3]);
    }
}

#[test]
fn derivative_of_square_repeats_last_slope() {
    let function = TabulatedFunctionFactory::LinkedList
        .create_from_function(&SqrFunction, 0.0, 4.0, 5)
        .unwrap();
    let derivative = TabulatedDifferentialOperator::default().derive(&*function).unwrap();
    assert_eq!(ys(&*derivative), vec![1.0, 3.0, 5.0, 7.0, 7.0]);
    let xs: Vec<f64> = derivative.iter().map(|sample| sample.x()).collect();
    assert_eq!(xs, GRID.to_vec());
}

#[test]
fn derivative_can_run_under_the_decorator_lock() {
    let function = TabulatedFunctionFactory::Array.create(&GRID, &[0.0, 1.0, 4.0, 9.0, 16.0]).unwrap();
    let shared = Arc::new(SynchronizedTabulatedFunction::from_boxed(function));
    let writer = Arc::clone(&shared);
    let handle = thread::spawn(move || {
        writer.do_synchronously(|f| {
            for i in 0..f.count() {
                let y = f.y(i).unwrap();
                f.set_y(i, 2.0 * y).unwrap();
            }
        })
    });
    let derivative = TabulatedDifferentialOperator::default()
        .derive_synchronously(&shared)
        .unwrap();
    handle.join().unwrap();
    let slopes = ys(&*derivative);
    assert!(
        slopes == vec![1.0, 3.0, 5.0, 7.0, 7.0] || slopes == vec![2.0, 6.0, 10.0, 14.0, 14.0],
        "derivative saw a partial update: {:?}",
        slopes
    );
}

#[test]
fn stepping_operators_approximate_square() {
    let step = 1e-4;
    let operators = [
        SteppingDifferentialOperator::left(step).unwrap(),
        SteppingDifferentialOperator::right(step).unwrap(),
        SteppingDifferentialOperator::central(step).unwrap(),
    ];
    for operator in operators {
        let derivative = operator.derive(SqrFunction);
        for &x in [-3.0, 0.0, 2.0, 10.0].iter() {
            assert!((derivative.apply(x) - 2.0 * x).abs() < 0.01, "{:?} at {}", operator.scheme(), x);
        }
    }
}

#[test]
fn central_scheme_is_exact_for_quadratics() {
    let derivative = SteppingDifferentialOperator::central(0.25).unwrap().derive(SqrFunction);
    assert_eq!(derivative.apply(3.0), 6.0);
}

#[test]
fn stepping_operators_accept_tabulated_functions() {
    let table = ArrayTabulatedFunction::from_function(&SqrFunction, 0.0, 10.0, 11).unwrap();
    let derivative = SteppingDifferentialOperator::central(0.5).unwrap().derive(table);
    assert!((derivative.apply(4.5) - 9.0).abs() < 1e-12);

    let shared = SynchronizedTabulatedFunction::new(
        ArrayTabulatedFunction::new(&[0.0, 1.0], &[0.0, 3.0]).unwrap(),
    );
    let derivative = SteppingDifferentialOperator::right(0.1).unwrap().derive(shared);
    assert!((derivative.apply(0.3) - 3.0).abs() < 1e-9);
    assert_eq!(derivative.function().count(), 2);
}
