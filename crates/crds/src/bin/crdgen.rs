//! Prints the CRD manifests for all resources owned by the AAD sync controller.
//!
//! Usage: `cargo run -p crds --bin crdgen > config/crd/aadgroupsyncs.yaml`

use crds::AADGroupSync;
use kube::CustomResourceExt;

fn main() -> anyhow::Result<()> {
    print!("{}", serde_yaml::to_string(&AADGroupSync::crd())?);
    Ok(())
}
