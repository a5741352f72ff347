fn main() {
    shellhook_lib::run()
}
