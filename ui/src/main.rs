fn main() {
    bike_traffic::main();
}
