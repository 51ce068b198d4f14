use tracing::{debug, info};

use crate::error::{NutriError, Result};
use crate::prediction::catalog::DishClass;

/// Square input resolution expected by the classifier.
pub const MODEL_INPUT_SIZE: usize = 224;

/// RGB channels.
pub const MODEL_INPUT_CHANNELS: usize = 3;

/// Length of one flattened `1 x 224 x 224 x 3` input tensor.
pub const MODEL_INPUT_LEN: usize = MODEL_INPUT_SIZE * MODEL_INPUT_SIZE * MODEL_INPUT_CHANNELS;

/// Top-scoring dish for one image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub dish: DishClass,

    /// Probability of `dish` as a percentage (0-100).
    pub confidence: f64,
}

/// Pick the highest-probability class from a model output vector.
///
/// Ties resolve to the lowest index.
pub fn top_prediction(scores: &[f32]) -> Result<Prediction> {
    if scores.len() != DishClass::COUNT {
        return Err(NutriError::InvalidPrediction(format!(
            "expected {} scores, got {}",
            DishClass::COUNT,
            scores.len()
        )));
    }
    if let Some(bad) = scores.iter().position(|s| !s.is_finite()) {
        return Err(NutriError::InvalidPrediction(format!(
            "score {} is not a finite number",
            bad
        )));
    }

    let mut best = 0;
    for (i, score) in scores.iter().enumerate().skip(1) {
        if *score > scores[best] {
            best = i;
        }
    }

    let dish = DishClass::from_index(best)
        .ok_or_else(|| NutriError::InvalidPrediction(format!("no class at index {}", best)))?;

    Ok(Prediction {
        dish,
        confidence: scores[best] as f64 * 100.0,
    })
}

/// A loaded image classifier.
pub trait Classifier {
    /// Score one normalized input tensor (`MODEL_INPUT_LEN` floats in `[0, 1]`).
    fn predict(&mut self, input: &[f32]) -> Result<Vec<f32>>;
}

/// Produces a classifier, typically by reading bundled weights.
pub trait ModelLoader {
    type Model: Classifier;

    fn load(&self) -> Result<Self::Model>;
}

/// Owns the classifier for one session.
///
/// The model is loaded and warmed up on first use, reused afterwards
/// and dropped by [`ModelSession::unload`] or when the session ends.
pub struct ModelSession<L: ModelLoader> {
    loader: L,
    model: Option<L::Model>,
}

impl<L: ModelLoader> ModelSession<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            model: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// The classifier, loading and warming it up if this is the first call.
    pub fn model(&mut self) -> Result<&mut L::Model> {
        if self.model.is_none() {
            let mut model = self.loader.load()?;
            model.predict(&vec![0.0; MODEL_INPUT_LEN])?;
            info!("model loaded and warmed up");
            self.model = Some(model);
        }
        self.model
            .as_mut()
            .ok_or_else(|| NutriError::ModelLoad("model unavailable after load".to_string()))
    }

    /// Run one forward pass and return the top dish.
    pub fn classify(&mut self, input: &[f32]) -> Result<Prediction> {
        if input.len() != MODEL_INPUT_LEN {
            return Err(NutriError::InvalidInput(format!(
                "input tensor must hold {} values, got {}",
                MODEL_INPUT_LEN,
                input.len()
            )));
        }
        let scores = self.model()?.predict(input)?;
        let prediction = top_prediction(&scores)?;
        debug!(dish = %prediction.dish, confidence = prediction.confidence, "classified image");
        Ok(prediction)
    }

    /// Drop the loaded model, if any.
    pub fn unload(&mut self) {
        if self.model.take().is_some() {
            info!("model unloaded");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    struct FixedModel {
        scores: Vec<f32>,
        calls: Rc<Cell<usize>>,
    }

    impl Classifier for FixedModel {
        fn predict(&mut self, _input: &[f32]) -> Result<Vec<f32>> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.scores.clone())
        }
    }

    struct FixedLoader {
        scores: Vec<f32>,
        loads: Rc<Cell<usize>>,
        calls: Rc<Cell<usize>>,
    }

    impl ModelLoader for FixedLoader {
        type Model = FixedModel;

        fn load(&self) -> Result<FixedModel> {
            self.loads.set(self.loads.get() + 1);
            Ok(FixedModel {
                scores: self.scores.clone(),
                calls: Rc::clone(&self.calls),
            })
        }
    }

    struct BrokenLoader;

    impl ModelLoader for BrokenLoader {
        type Model = FixedModel;

        fn load(&self) -> Result<FixedModel> {
            Err(NutriError::ModelLoad("weights missing".to_string()))
        }
    }

    fn scores_for(index: usize) -> Vec<f32> {
        let mut scores = vec![0.01; DishClass::COUNT];
        scores[index] = 0.92;
        scores
    }

    #[test]
    fn test_top_prediction() {
        let prediction = top_prediction(&scores_for(5)).unwrap();
        assert_eq!(prediction.dish, DishClass::Samosa);
        assert!((prediction.confidence - 92.0).abs() < 1e-3);
    }

    #[test]
    fn test_top_prediction_tie_takes_first() {
        let scores = vec![0.5, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        assert_eq!(top_prediction(&scores).unwrap().dish, DishClass::Momos);
    }

    #[test]
    fn test_top_prediction_rejects_bad_vectors() {
        assert!(top_prediction(&[]).is_err());
        assert!(top_prediction(&[1.0; 3]).is_err());

        let mut scores = scores_for(0);
        scores[3] = f32::NAN;
        assert!(matches!(
            top_prediction(&scores),
            Err(NutriError::InvalidPrediction(_))
        ));
    }

    #[test]
    fn test_session_loads_once_and_warms_up() {
        let loads = Rc::new(Cell::new(0));
        let calls = Rc::new(Cell::new(0));
        let mut session = ModelSession::new(FixedLoader {
            scores: scores_for(8),
            loads: Rc::clone(&loads),
            calls: Rc::clone(&calls),
        });
        assert!(!session.is_loaded());

        let input = vec![0.5; MODEL_INPUT_LEN];
        assert_eq!(session.classify(&input).unwrap().dish, DishClass::VadaPav);
        assert_eq!(session.classify(&input).unwrap().dish, DishClass::VadaPav);

        assert_eq!(loads.get(), 1);
        // One warm-up pass plus two real ones.
        assert_eq!(calls.get(), 3);

        session.unload();
        assert!(!session.is_loaded());
        session.classify(&input).unwrap();
        assert_eq!(loads.get(), 2);
    }

    #[test]
    fn test_session_rejects_wrong_input_size() {
        let mut session = ModelSession::new(FixedLoader {
            scores: scores_for(0),
            loads: Rc::new(Cell::new(0)),
            calls: Rc::new(Cell::new(0)),
        });
        assert!(matches!(
            session.classify(&[0.0; 10]),
            Err(NutriError::InvalidInput(_))
        ));
        assert!(!session.is_loaded());
    }

    #[test]
    fn test_session_load_failure_propagates() {
        let mut session = ModelSession::new(BrokenLoader);
        let input = vec![0.0; MODEL_INPUT_LEN];
        assert!(matches!(
            session.classify(&input),
            Err(NutriError::ModelLoad(_))
        ));
        assert!(!session.is_loaded());
    }
}
