/// All commands need to have this trait which gives the opcode of the command
/// which needs to be sent over SPI with the Data/Command line in command mode
pub(crate) trait Command: Copy {
    fn address(self) -> u8;
}
