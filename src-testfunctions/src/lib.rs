//! Benchmark fitness functions for the JADE optimizer
//!
//! The classic set used to validate adaptive differential evolution
//! (sphere, Schwefel 2.22 / 1.2 / 2.21 / 2.26, Rosenbrock, step, Rastrigin).
//! Every function is deterministic, as the optimizer's selection step
//! compares a freshly computed trial fitness against a recorded one.
//!
//! # Example
//!
//! ```rust
//! use ndarray::Array1;
//! use jade_testfunctions::*;
//!
//! let x = Array1::from_vec(vec![0.0, 0.0]);
//! assert_eq!(sphere(&x), 0.0);
//!
//! let meta = get_function_metadata("rastrigin").unwrap();
//! assert_eq!(meta.bounds, (-5.12, 5.12));
//! ```

use ndarray::Array1;

pub mod functions;
pub use functions::*;

/// Signature shared by all benchmark functions
pub type TestFunction = fn(&Array1<f64>) -> f64;

/// Metadata for a benchmark function
#[derive(Debug, Clone)]
pub struct FunctionMetadata {
    /// Function name as accepted by [`get_function`]
    pub name: &'static str,
    /// Label used in the literature (f1, f2, ...)
    pub label: &'static str,
    /// The function itself
    pub function: TestFunction,
    /// Default bounds, identical for every dimension
    pub bounds: (f64, f64),
    /// Coordinate of the global minimum, identical for every dimension
    pub optimum_coordinate: f64,
    /// Value at the global minimum
    pub optimum_value: f64,
    /// Whether the function is multimodal
    pub multimodal: bool,
}

impl FunctionMetadata {
    /// Location of the global minimum in `dim` dimensions
    pub fn global_minimum(&self, dim: usize) -> Array1<f64> {
        Array1::from_elem(dim, self.optimum_coordinate)
    }

    /// Per-dimension bounds for a problem of dimension `dim`
    pub fn bounds_vec(&self, dim: usize) -> Vec<(f64, f64)> {
        vec![self.bounds; dim]
    }
}

const REGISTRY: &[FunctionMetadata] = &[
    FunctionMetadata {
        name: "sphere",
        label: "f1",
        function: sphere,
        bounds: (-100.0, 100.0),
        optimum_coordinate: 0.0,
        optimum_value: 0.0,
        multimodal: false,
    },
    FunctionMetadata {
        name: "schwefel_2_22",
        label: "f2",
        function: schwefel_2_22,
        bounds: (-10.0, 10.0),
        optimum_coordinate: 0.0,
        optimum_value: 0.0,
        multimodal: false,
    },
    FunctionMetadata {
        name: "schwefel_1_2",
        label: "f3",
        function: schwefel_1_2,
        bounds: (-100.0, 100.0),
        optimum_coordinate: 0.0,
        optimum_value: 0.0,
        multimodal: false,
    },
    FunctionMetadata {
        name: "schwefel_2_21",
        label: "f4",
        function: schwefel_2_21,
        bounds: (-100.0, 100.0),
        optimum_coordinate: 0.0,
        optimum_value: 0.0,
        multimodal: false,
    },
    FunctionMetadata {
        name: "rosenbrock",
        label: "f5",
        function: rosenbrock,
        bounds: (-30.0, 30.0),
        optimum_coordinate: 1.0,
        optimum_value: 0.0,
        multimodal: false,
    },
    FunctionMetadata {
        name: "step",
        label: "f6",
        function: step,
        bounds: (-100.0, 100.0),
        optimum_coordinate: 0.0,
        optimum_value: 0.0,
        multimodal: false,
    },
    FunctionMetadata {
        name: "schwefel_2_26",
        label: "f8",
        function: schwefel_2_26,
        bounds: (-500.0, 500.0),
        optimum_coordinate: 420.968_746,
        optimum_value: 0.0,
        multimodal: true,
    },
    FunctionMetadata {
        name: "rastrigin",
        label: "f9",
        function: rastrigin,
        bounds: (-5.12, 5.12),
        optimum_coordinate: 0.0,
        optimum_value: 0.0,
        multimodal: true,
    },
];

/// All registered functions
pub fn all_functions() -> &'static [FunctionMetadata] {
    REGISTRY
}

/// Names of the registered functions, in registry order
pub fn function_names() -> Vec<&'static str> {
    REGISTRY.iter().map(|m| m.name).collect()
}

/// Look up metadata by name or literature label (`"sphere"` or `"f1"`)
pub fn get_function_metadata(name: &str) -> Option<&'static FunctionMetadata> {
    let key = name.to_lowercase();
    REGISTRY.iter().find(|m| m.name == key || m.label == key)
}

/// Look up a function by name or label
pub fn get_function(name: &str) -> Option<TestFunction> {
    get_function_metadata(name).map(|m| m.function)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        assert!(get_function("sphere").is_some());
        assert!(get_function("F9").is_some());
        assert!(get_function("nope").is_none());
        assert_eq!(function_names().len(), all_functions().len());
    }

    #[test]
    fn test_registry_optima() {
        for meta in all_functions() {
            let x = meta.global_minimum(3);
            let value = (meta.function)(&x);
            assert!(
                (value - meta.optimum_value).abs() < 1e-3,
                "{} at its optimum gives {}",
                meta.name,
                value
            );
            let (lo, hi) = meta.bounds;
            assert!(lo < hi);
            assert!(x.iter().all(|&xi| xi >= lo && xi <= hi));
        }
    }
}
