//! Sidebar index of the `dynasmrt` crate root, as rustdoc emits it.

pub const DYNASMRT_INDEX: &str = r#"{"enum":[["DynasmError","An error type that is returned from various check and check_exact methods"]],"macro":[["dynasm","The whole point"],["dynasm_backwards","Similar to `dynasm!`, but the calls to the assembler are executed in piecewise reversed order."]],"mod":[["aarch64","Runtime assembler implementations for the aarch64 architecture."],["common","This module contains several utility structs for use by the assembler implementations."],["x64","Runtime assembler implementations for the x64 architecture."],["x86","Runtime assembler implementations for the x86 architecture."]],"struct":[["AssemblyOffset","A struct representing an offset into the assembling buffer of a `DynasmLabelApi` struct."],["DynamicLabel","A dynamic label"],["ExecutableBuffer","A structure holding a buffer of executable memory"],["Executor","A read-only shared reference to the executable buffer inside an Assembler."],["LabelRegistry","A registry of labels."],["MutableBuffer","A structure wrapping some executable memory. It dereferences into a &mut [u8] slice."]],"trait":[["DynasmApi","This trait represents the interface that must be implemented to allow the dynasm preprocessor to assemble into a datastructure."],["DynasmLabelApi","This trait extends DynasmApi to not only allow assembling, but also labels and various directives"]]}"#;

pub fn sidebar_script() -> String {
    format!("initSidebarItems({});", DYNASMRT_INDEX)
}
