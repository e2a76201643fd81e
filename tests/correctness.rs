use approx::assert_relative_eq;
use minimath::{
    dot, matvec, scale, transpose, MatExpr, Matrix, MatrixView, MinimathError, Order, VecExpr,
    Vector, VectorView,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::StandardNormal;

fn random_vector(rng: &mut StdRng, size: usize) -> Vector<f64> {
    Vector::from_fn(size, |_| rng.sample(StandardNormal))
}

fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize, order: Order) -> Matrix<f64> {
    Matrix::from_fn(rows, cols, order, |_, _| rng.sample(StandardNormal))
}

#[test]
fn test_sum_of_filled_vectors() {
    let mut x = Vector::new(10);
    let mut y = Vector::new(10);
    x.fill(1.0);
    y.fill(2.0);
    let z = Vector::from_expr(&x + &y);
    assert_eq!(z.to_string(), "3, 3, 3, 3, 3, 3, 3, 3, 3, 3");
}

#[test]
fn test_sum_of_counting_and_constant() {
    let x = Vector::from_fn(10, |i| i as f64);
    let mut y = Vector::new(10);
    y.fill(10.0);
    let z = Vector::from_expr(&x + &y);
    assert_eq!(z.to_string(), "10, 11, 12, 13, 14, 15, 16, 17, 18, 19");
    for i in 0..10 {
        assert_eq!(z[i], 10.0 + i as f64);
    }
}

#[test]
fn test_axpy_expression() {
    let x = Vector::from_fn(10, |i| i as f64);
    let mut y = Vector::new(10);
    y.fill(10.0);
    let mut z = Vector::new(10);
    z.assign(&x + 3.0 * &y);
    for i in 0..10 {
        assert_eq!(z[i], 30.0 + i as f64);
    }
}

#[test]
fn test_range_then_slice_assignment() {
    let mut x = Vector::from_fn(10, |i| i as f64);
    x.range_mut(2, 9).fill(3.0);
    x.slice_mut(1, 5).fill(10.0);
    assert_eq!(x.to_string(), "0, 10, 3, 3, 3, 3, 10, 3, 3, 9");
}

#[test]
fn test_slice_with_uneven_step() {
    // step 3 over 10 elements covers 10 / 3 positions
    let mut x = Vector::from_fn(10, |i| i as f64);
    assert_eq!(x.slice(0, 3).len(), 3);
    x.slice_mut(0, 3).fill(-1.0);
    assert_eq!(x.to_string(), "-1, 1, 2, -1, 4, 5, -1, 7, 8, 9");
}

#[test]
fn test_assign_expression_into_view() {
    let x = Vector::from_fn(4, |i| i as f64);
    let mut y = Vector::new(8);
    y.slice_mut(0, 2).assign(&x + &x);
    y.slice_mut(1, 2).assign(scale(-1.0, &x));
    assert_eq!(y.as_slice(), &[0.0, -0.0, 2.0, -1.0, 4.0, -2.0, 6.0, -3.0]);
}

#[test]
fn test_sum_and_scale_elementwise() {
    let mut rng = StdRng::seed_from_u64(42);
    for size in [0, 1, 7, 64] {
        let x = random_vector(&mut rng, size);
        let y = random_vector(&mut rng, size);
        let s: f64 = rng.sample(StandardNormal);
        let sum = x.iter().zip(y.iter()).map(|(a, b)| a + b);
        for (i, expected) in sum.enumerate() {
            assert_eq!((&x + &y).read(i), expected);
        }
        let scaled = Vector::from_expr(s * &x);
        for i in 0..size {
            assert_eq!(scaled[i], s * x[i]);
        }
    }
}

#[test]
fn test_dot_properties() {
    let mut rng = StdRng::seed_from_u64(7);
    for size in [0, 3, 100] {
        let x = random_vector(&mut rng, size);
        let y = random_vector(&mut rng, size);
        assert_relative_eq!(dot(&x, &y), dot(&y, &x), epsilon = 1e-12);
        assert!(dot(&x, &x) >= 0.0);
        let expected: f64 = x.iter().zip(y.iter()).map(|(a, b)| a * b).sum();
        assert_relative_eq!(dot(&x, &y), expected, epsilon = 1e-10);
    }
}

#[test]
fn test_dot_over_strided_views() {
    let data: Vec<f64> = (0..12).map(|i| i as f64).collect();
    let even = VectorView::new(&data, 6, 2, 0).unwrap();
    let odd = VectorView::new(&data, 6, 2, 1).unwrap();
    // sum of 2k * (2k + 1) for k in 0..6
    assert_eq!(dot(even, odd), 250.0);
}

#[test]
fn test_transpose_involution() {
    let mut rng = StdRng::seed_from_u64(3);
    for order in [Order::RowMajor, Order::ColMajor] {
        let a = random_matrix(&mut rng, 4, 7, order);
        let tt = transpose(transpose(&a));
        assert_eq!(tt.shape(), a.shape());
        for i in 0..4 {
            for j in 0..7 {
                assert_eq!(tt.read(i, j), a[(i, j)]);
            }
        }
        let view_tt = a.t().t();
        assert_eq!(view_tt[(3, 6)], a[(3, 6)]);
    }
}

#[test]
fn test_transpose_plus_matrix() {
    let a = Matrix::from_fn(3, 3, Order::RowMajor, |i, j| (3 * i + j) as f64);
    let b = Matrix::from_fn(3, 3, Order::ColMajor, |i, j| (i * j) as f64);
    let c = Matrix::from_expr(transpose(&a) + &b, Order::RowMajor);
    for i in 0..3 {
        for j in 0..3 {
            assert_eq!(c[(i, j)], a[(j, i)] + b[(i, j)]);
        }
    }
}

#[test]
fn test_matmul_sum_of_products() {
    let mut rng = StdRng::seed_from_u64(11);
    for (m, k, n) in [(1, 1, 1), (3, 5, 2), (8, 4, 6)] {
        let a = random_matrix(&mut rng, m, k, Order::RowMajor);
        let b = random_matrix(&mut rng, k, n, Order::ColMajor);
        let c = Matrix::from_expr(&a * &b, Order::ColMajor);
        assert_eq!(c.shape(), (m, n));
        for i in 0..m {
            for j in 0..n {
                let expected: f64 = (0..k).map(|p| a[(i, p)] * b[(p, j)]).sum();
                assert_relative_eq!(c[(i, j)], expected, epsilon = 1e-10);
            }
        }
    }
}

#[test]
fn test_matmul_transpose_identity() {
    // (a * b)^T == b^T * a^T
    let mut rng = StdRng::seed_from_u64(5);
    let a = random_matrix(&mut rng, 3, 4, Order::RowMajor);
    let b = random_matrix(&mut rng, 4, 2, Order::RowMajor);
    let lhs = Matrix::from_expr(transpose(&a * &b), Order::RowMajor);
    let rhs = Matrix::from_expr(b.t() * a.t(), Order::RowMajor);
    for i in 0..2 {
        for j in 0..3 {
            assert_relative_eq!(lhs[(i, j)], rhs[(i, j)], epsilon = 1e-12);
        }
    }
}

#[test]
fn test_matvec_matches_rows() {
    let mut rng = StdRng::seed_from_u64(9);
    let a = random_matrix(&mut rng, 5, 3, Order::ColMajor);
    let x = random_vector(&mut rng, 3);
    let y = Vector::from_expr(a.mul_vec(&x));
    for i in 0..5 {
        assert_relative_eq!(y[i], dot(a.row(i), &x), epsilon = 1e-12);
    }
    let yt = Vector::from_expr(matvec(transpose(&a), &y));
    assert_eq!(yt.len(), 3);
}

#[test]
fn test_block_of_padded_buffer() {
    // 3x3 row-major block inside a 3x5 buffer
    let data: Vec<f64> = (0..15).map(|i| i as f64).collect();
    let v = MatrixView::new(&data, 3, 3, 5, Order::RowMajor).unwrap();
    assert_eq!(v.to_string(), "012\n567\n101112\n");
    let inner = v.block(1..3, 1..3);
    assert_eq!(inner.to_matrix().as_slice(), &[6.0, 7.0, 11.0, 12.0]);
    assert_eq!(
        MatrixView::new(&data, 3, 6, 5, Order::RowMajor).unwrap_err(),
        MinimathError::InvalidDistance { dist: 5, run: 6 }
    );
}

#[test]
fn test_view_with_huge_distance() {
    let data = [0.0; 4];
    assert_eq!(
        VectorView::new(&data, 2, usize::MAX, 0).unwrap_err(),
        MinimathError::InvalidView {
            required: usize::MAX,
            available: 4
        }
    );
    assert!(VectorView::new(&data, 1, usize::MAX, 3).is_ok());
    assert_eq!(
        MatrixView::new(&data, 2, 2, usize::MAX, Order::RowMajor).unwrap_err(),
        MinimathError::InvalidView {
            required: usize::MAX,
            available: 4
        }
    );
}

#[test]
fn test_view_writes_are_visible_through_matrix() {
    let mut a = Matrix::<f64>::col_major(3, 3);
    a.block_mut(1..3, 0..2).assign(&Matrix::from_fn(2, 2, Order::RowMajor, |i, j| {
        (1 + i + j) as f64
    }));
    a.row_mut(0).fill(-1.0);
    assert_eq!(a.to_string(), "-1-1-1\n120\n230\n");
}

#[test]
fn test_out_of_range_exactly_past_end() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..20 {
        let size = rng.gen_range(0..16);
        let x = Vector::<f64>::new(size);
        for i in 0..size + 3 {
            assert_eq!(x.get(i).is_ok(), i < size);
        }
        assert_eq!(
            x.get(size),
            Err(MinimathError::IndexOutOfRange { index: size, size })
        );
    }
    let a = Matrix::<f64>::row_major(2, 3);
    assert!(a.get(1, 2).is_ok());
    assert!(a.get(2, 2).is_err());
    assert!(a.get(1, 3).is_err());
}

#[test]
fn test_byte_round_trip() {
    let mut rng = StdRng::seed_from_u64(99);
    let x = random_vector(&mut rng, 33);
    let (size, bytes) = x.raw_state();
    let y = Vector::<f64>::from_bytes(size, &bytes).unwrap();
    assert_eq!(x, y);
    assert_eq!(
        Vector::<f64>::from_bytes(size + 1, &bytes),
        Err(MinimathError::ByteLength {
            expected: (size + 1) * 8,
            actual: size * 8
        })
    );
}

#[test]
fn test_copy_and_move_semantics() {
    let x = Vector::from_slice(&[1.0, 2.0, 3.0]);
    let mut y = x.clone();
    y[0] = 100.0;
    assert_eq!(x[0], 1.0);
    let z = y;
    assert_eq!(z[0], 100.0);
}
