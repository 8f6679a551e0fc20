fn main() {
    leptos::mount::mount_to_body(batlog_adapter_dashboard_leptos::App);
}
