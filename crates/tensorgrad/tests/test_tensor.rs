//! Integration tests for the dense tensor API.

use tensorgrad::{Device, Tensor, TensorError};

fn mat(data: Vec<f64>, rows: usize, cols: usize) -> Tensor<f64> {
    Tensor::from_vec(data, &[rows, cols]).unwrap()
}

#[test]
fn test_constructors_agree() {
    let from_vec = mat(vec![1.0, 2.0, 3.0, 4.0], 2, 2);
    let from_nested = Tensor::<f64>::from_nested([[1.0, 2.0], [3.0, 4.0]]).unwrap();
    assert_eq!(from_vec, from_nested);

    let scalar = Tensor::scalar(2.0);
    assert_eq!(scalar.shape(), &[] as &[usize]);
    assert_eq!(scalar.len(), 1);
}

#[test]
fn test_index_errors() {
    let mut t: Tensor<f64> = Tensor::zeros(&[2, 3]);
    assert!(matches!(
        t.at(&[1]),
        Err(TensorError::WrongNumberOfIndices { .. })
    ));
    assert!(matches!(
        t.set(&[2, 0], 1.0),
        Err(TensorError::IndexOutOfRange { index: 2, dim: 0, .. })
    ));
    t.set(&[1, 2], 1.0).unwrap();
    assert_eq!(t.data()[5], 1.0);
}

#[test]
fn test_reshape_round_trip_preserves_order() {
    let t: Tensor<f64> = Tensor::from_vec((0..24).map(f64::from).collect(), &[2, 3, 4]).unwrap();
    let r = t.reshape(&[6, 4]).unwrap().reshape(&[24]).unwrap();
    let back = r.reshape(&[2, 3, 4]).unwrap();
    assert_eq!(back, t);
    assert_eq!(back.strides(), &[12, 4, 1]);
    assert_eq!(back.at(&[1, 2, 3]).unwrap(), 23.0);
}

#[test]
fn test_elementwise_errors() {
    let a = mat(vec![1.0, 2.0, 3.0, 4.0], 2, 2);
    let b = mat(vec![1.0, 0.0, 1.0, 1.0], 2, 2);
    assert_eq!(a.div(&b).unwrap_err(), TensorError::DivisionByZero);
    assert_eq!(a.div_scalar(0.0).unwrap_err(), TensorError::DivisionByZero);
    assert!(matches!(
        a.add(&Tensor::ones(&[4])),
        Err(TensorError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_inplace_div_leaves_tensor_on_error() {
    let mut a = mat(vec![1.0, 2.0, 3.0, 4.0], 2, 2);
    let b = mat(vec![2.0, 0.0, 2.0, 2.0], 2, 2);
    assert!(a.div_inplace(&b).is_err());
    assert_eq!(a.data(), &[1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_matmul_and_transpose() {
    let a = mat(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3);
    let at = a.transpose().unwrap();
    assert_eq!(at.shape(), &[3, 2]);

    let gram = a.matmul(&at).unwrap();
    assert_eq!(gram.data(), &[14.0, 32.0, 32.0, 77.0]);
    assert!(matches!(
        a.matmul(&a),
        Err(TensorError::MatMulShapeMismatch { .. })
    ));
}

#[test]
fn test_reductions() {
    let a = mat(vec![1.0, 2.0, 3.0, 4.0], 2, 2);
    assert_eq!(a.sum().item().unwrap(), 10.0);
    assert_eq!(a.mean().item().unwrap(), 2.5);
    assert_eq!(a.sum().ndim(), 0);
}

#[test]
fn test_non_default_device_rejected() {
    let a: Tensor<f32> = Tensor::ones(&[2]);
    assert!(a.to_device(Device::default()).is_ok());
    let err = a.to_device(Device::Metal).unwrap_err();
    assert!(matches!(err, TensorError::UnsupportedOperation(_)));
    assert!(err.to_string().contains("metal"));
}
