fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=proto/payroll.proto"); // Rerun if .proto file changes
    tonic_build::configure()
        .build_server(true) // Generate server code
        .build_client(true) // Generate client code, consumed by the forms crate
        .compile(
            &["proto/payroll.proto"], // Path to .proto files relative to engine crate root
            &["proto"],               // Include path for .proto files
        )?;
    Ok(())
}
