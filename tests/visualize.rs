//! End-to-end checks through the public API.

use ndarray::Array2;
use num_complex::Complex64;
use qcolorspace::errors::{StateError, VisualizeError};
use qcolorspace::render::BackgroundGradient;
use qcolorspace::{
    Canvas, DIM, Gate, GateStep, Layout, Primitive, QuantumState, Rgb, StateRenderer,
    VisualizeRequest, fixtures,
};

fn sweep() -> Vec<[Complex64; DIM]> {
    let values = [-1.5, -0.25, 0.0, 0.7, 2.0];
    let mut out = Vec::new();
    for (k, &a) in values.iter().enumerate() {
        for &b in &values {
            let c = values[(k + 2) % values.len()];
            out.push([
                Complex64::new(a, b),
                Complex64::new(b, c),
                Complex64::new(c, -a),
                Complex64::new(0.1, a * b),
            ]);
        }
    }
    out
}

#[test]
fn probabilities_sum_to_one_for_nonzero_vectors() {
    for amplitudes in sweep() {
        let state = QuantumState::new(amplitudes);
        let total: f64 = state.probabilities().iter().sum();
        assert!((total - 1.0).abs() < 1e-9, "{amplitudes:?} gave {total}");
    }
}

#[test]
fn extreme_finite_amplitudes_normalize() {
    let tiny = QuantumState::new([
        Complex64::new(1e-200, 0.0),
        Complex64::new(0.0, 0.0),
        Complex64::new(0.0, 0.0),
        Complex64::new(0.0, 0.0),
    ]);
    assert!(!tiny.is_degenerate());
    assert!(tiny.is_normalized());

    let huge = QuantumState::new([Complex64::new(1e200, 0.0); DIM]);
    assert!(!huge.is_degenerate());
    assert_eq!(huge.probabilities(), [0.25; DIM]);

    let renderer = StateRenderer::default();
    for field in ["1e200", "1e-200", "1e308"] {
        let result = VisualizeRequest::new([field, "0", "0", "0"])
            .execute(&renderer)
            .unwrap();
        assert_eq!(result.state.probabilities(), [1.0, 0.0, 0.0, 0.0], "{field}");
        assert_eq!(result.state_color.hex, "#FF00FF", "{field}");
    }
}

#[test]
fn zero_vector_skips_normalization() {
    let state = QuantumState::new([Complex64::new(0.0, 0.0); DIM]);
    assert_eq!(state.probabilities(), [0.0; DIM]);

    let result = VisualizeRequest::new(["0", "0", "0", "0"])
        .execute(&StateRenderer::default())
        .unwrap();
    assert_eq!(result.state_color.color, Rgb::BLACK);
    assert!(result.channels.iter().all(|c| c.hex == "#000000"));
    let radii: Vec<i32> = result
        .frame
        .iter()
        .filter_map(|p| match p {
            Primitive::Circle { radius, .. } => Some(*radius),
            _ => None,
        })
        .collect();
    assert_eq!(radii, vec![0; DIM]);
}

#[test]
fn identity_gate_is_idempotent() {
    for amplitudes in sweep() {
        let state = QuantumState::new(amplitudes);
        let after = state.with_gate(&Array2::eye(DIM)).unwrap();
        for (a, b) in state.probabilities().iter().zip(after.probabilities()) {
            assert!((a - b).abs() < 1e-12);
        }
    }
}

#[test]
fn shape_mismatch_is_a_hard_error() {
    let mut state = QuantumState::basis(0).unwrap();
    assert!(matches!(
        state.apply_gate(&fixtures::hadamard()),
        Err(StateError::ShapeMismatch { .. })
    ));
    assert!(matches!(
        state.apply_gate(&Array2::zeros((4, 3))),
        Err(StateError::ShapeMismatch {
            got_rows: 4,
            got_cols: 3,
            ..
        })
    ));

    let err = VisualizeRequest::new(["1", "0", "0", "0"])
        .with_gate(GateStep::Matrix(Array2::eye(8)))
        .execute(&StateRenderer::default())
        .unwrap_err();
    assert!(matches!(err, VisualizeError::State(_)));
}

#[test]
fn documented_examples() {
    let renderer = StateRenderer::default();

    let ground = VisualizeRequest::new(["1", "0", "0", "0"])
        .execute(&renderer)
        .unwrap();
    assert_eq!(ground.state.probabilities(), [1.0, 0.0, 0.0, 0.0]);
    assert_eq!(ground.state_color.color, Rgb::new(255, 0, 255));
    assert_eq!(ground.state_color.hex, "#FF00FF");

    let uniform = VisualizeRequest::new(["1", "1", "1", "1"])
        .execute(&renderer)
        .unwrap();
    for a in uniform.state.amplitudes() {
        assert!((a.norm() - 0.5).abs() < 1e-12);
    }
    assert_eq!(uniform.state.probabilities(), [0.25; DIM]);
    assert_eq!(uniform.state_color.hex, "#FFFFFF");
}

#[test]
fn parse_error_names_the_field() {
    let err = VisualizeRequest::new(["1", "0", "0", "one"])
        .execute(&StateRenderer::default())
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("|11⟩"), "{message}");
    assert!(message.contains("Please enter valid complex numbers"));
}

#[test]
fn gradient_is_monotonic_inside_the_plot() {
    let canvas = Canvas::new(317, 241, 23);
    let gradient = BackgroundGradient::new(&canvas).unwrap();
    let plot = gradient.rect();

    for y in plot.y..plot.y + plot.height {
        let mut last = 0;
        for x in plot.x..plot.x + plot.width {
            let r = gradient.color_at(x, y).unwrap().r;
            assert!(r >= last);
            last = r;
        }
    }
    for x in plot.x..plot.x + plot.width {
        let mut last = 0;
        for y in (plot.y..plot.y + plot.height).rev() {
            let g = gradient.color_at(x, y).unwrap().g;
            assert!(g >= last);
            last = g;
        }
    }
}

#[test]
fn renderer_is_shareable_across_threads() {
    let renderer = StateRenderer::default();
    let canvas = Canvas::default();
    let state = QuantumState::basis(3).unwrap();
    let expected = renderer.render(Some(&state), &canvas);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| assert_eq!(renderer.render(Some(&state), &canvas), expected));
        }
    });
}

#[test]
fn custom_layout_moves_glyphs_and_colors() {
    let layout = Layout::from_toml_str(
        r##"
        positions = [[0.5, 0.0], [1.0, 0.5], [0.5, 1.0], [0.0, 0.5]]
        palette = ["#FFFFFF", "#808080", "#FF00FF", "#00FFFF"]
        "##,
    )
    .unwrap();
    let renderer = StateRenderer::new(layout).unwrap();
    let mut state = QuantumState::basis(0).unwrap();
    state.apply(&Gate::h(), &[1]).unwrap();

    let glyphs = renderer.glyphs(&state, &Canvas::default());
    assert_eq!((glyphs[0].center.x, glyphs[0].center.y), (500, 950));
    assert_eq!((glyphs[3].center.x, glyphs[3].center.y), (50, 500));

    let chips = renderer.channel_swatches(&state);
    assert_eq!(chips[0].hex, "#7F7F7F");
    assert_eq!(chips[2].hex, "#7F007F");
    assert_eq!(chips[1].hex, "#000000");
}
