use std::io;

use rowan_chess::uci::run_stdio_loop;

fn main() -> io::Result<()> {
    run_stdio_loop()
}
