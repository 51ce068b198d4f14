pub mod catalog;
pub mod session;

pub use catalog::DishClass;
pub use session::{
    top_prediction, Classifier, ModelLoader, ModelSession, Prediction, MODEL_INPUT_CHANNELS,
    MODEL_INPUT_LEN, MODEL_INPUT_SIZE,
};
