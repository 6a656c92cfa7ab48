use ndarray::Array1;

/// Record of one forward pass, consumed by backpropagation.
///
/// `pre_activations[i]` is the value produced by weight matrix `i` (plus bias), i.e. the
/// pre-activation `z` of layer `i + 1`. `outputs[0]` is the raw input and `outputs[i + 1]`
/// is the post-activation of layer `i + 1`, so there is always one more output than there
/// are pre-activations.
///
/// A trace remembers the network and the parameter generation it was computed against.
/// Backpropagation refuses traces from any other network, and traces from before the
/// network's last parameter update.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardTrace {
    pub(crate) pre_activations: Vec<Array1<f32>>,
    pub(crate) outputs: Vec<Array1<f32>>,
    pub(crate) network_id: u64,
    pub(crate) generation: u64,
}

impl ForwardTrace {
    /// Pre-activations of layers `1..`, in order.
    pub fn pre_activations(&self) -> &[Array1<f32>] {
        &self.pre_activations
    }

    /// Post-activations of every layer, the raw input first.
    pub fn outputs(&self) -> &[Array1<f32>] {
        &self.outputs
    }

    /// Post-activation of the final layer.
    pub fn output(&self) -> &Array1<f32> {
        // a trace always holds at least the input and one layer output
        &self.outputs[self.outputs.len() - 1]
    }

    /// The raw input the trace was produced from.
    pub fn input(&self) -> &Array1<f32> {
        &self.outputs[0]
    }
}
