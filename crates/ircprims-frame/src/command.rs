//! Command verbs and numeric replies.
//!
//! Names follow RFC 2812. The table is static: [`command_name`] is a pure
//! lookup used for display and registration classification, and carries no
//! behavior of its own.

// Command verbs.
pub const PASS: &str = "PASS";
pub const NICK: &str = "NICK";
pub const USER: &str = "USER";
pub const OPER: &str = "OPER";
pub const MODE: &str = "MODE";
pub const SERVICE: &str = "SERVICE";
pub const QUIT: &str = "QUIT";
pub const SQUIT: &str = "SQUIT";
pub const JOIN: &str = "JOIN";
pub const PART: &str = "PART";
pub const TOPIC: &str = "TOPIC";
pub const NAMES: &str = "NAMES";
pub const LIST: &str = "LIST";
pub const INVITE: &str = "INVITE";
pub const KICK: &str = "KICK";
pub const PRIVMSG: &str = "PRIVMSG";
pub const NOTICE: &str = "NOTICE";
pub const MOTD: &str = "MOTD";
pub const LUSERS: &str = "LUSERS";
pub const VERSION: &str = "VERSION";
pub const STATS: &str = "STATS";
pub const LINKS: &str = "LINKS";
pub const TIME: &str = "TIME";
pub const CONNECT: &str = "CONNECT";
pub const TRACE: &str = "TRACE";
pub const ADMIN: &str = "ADMIN";
pub const INFO: &str = "INFO";
pub const SERVLIST: &str = "SERVLIST";
pub const SQUERY: &str = "SQUERY";
pub const WHO: &str = "WHO";
pub const WHOIS: &str = "WHOIS";
pub const WHOWAS: &str = "WHOWAS";
pub const KILL: &str = "KILL";
pub const PING: &str = "PING";
pub const PONG: &str = "PONG";
pub const ERROR: &str = "ERROR";
pub const AWAY: &str = "AWAY";
pub const REHASH: &str = "REHASH";
pub const DIE: &str = "DIE";
pub const RESTART: &str = "RESTART";
pub const SUMMON: &str = "SUMMON";
pub const USERS: &str = "USERS";
pub const WALLOPS: &str = "WALLOPS";
pub const USERHOST: &str = "USERHOST";
pub const ISON: &str = "ISON";

// Numeric replies.
pub const RPL_WELCOME: &str = "001";
pub const RPL_YOURHOST: &str = "002";
pub const RPL_CREATED: &str = "003";
pub const RPL_MYINFO: &str = "004";
pub const RPL_BOUNCE: &str = "005";
pub const RPL_USERHOST: &str = "302";
pub const RPL_ISON: &str = "303";
pub const RPL_AWAY: &str = "301";
pub const RPL_UNAWAY: &str = "305";
pub const RPL_NOWAWAY: &str = "306";
pub const RPL_WHOISUSER: &str = "311";
pub const RPL_WHOISSERVER: &str = "312";
pub const RPL_WHOISOPERATOR: &str = "313";
pub const RPL_WHOISIDLE: &str = "317";
pub const RPL_ENDOFWHOIS: &str = "318";
pub const RPL_WHOISCHANNELS: &str = "319";
pub const RPL_WHOWASUSER: &str = "314";
pub const RPL_ENDOFWHOWAS: &str = "369";
pub const RPL_LISTSTART: &str = "321";
pub const RPL_LIST: &str = "322";
pub const RPL_LISTEND: &str = "323";
pub const RPL_UNIQOPIS: &str = "325";
pub const RPL_CHANNELMODEIS: &str = "324";
pub const RPL_NOTOPIC: &str = "331";
pub const RPL_TOPIC: &str = "332";
pub const RPL_TOPICWHOTIME: &str = "333"; // ircu specific (not in the RFC)
pub const RPL_INVITING: &str = "341";
pub const RPL_SUMMONING: &str = "342";
pub const RPL_INVITELIST: &str = "346";
pub const RPL_ENDOFINVITELIST: &str = "347";
pub const RPL_EXCEPTLIST: &str = "348";
pub const RPL_ENDOFEXCEPTLIST: &str = "349";
pub const RPL_VERSION: &str = "351";
pub const RPL_WHOREPLY: &str = "352";
pub const RPL_ENDOFWHO: &str = "315";
pub const RPL_NAMREPLY: &str = "353";
pub const RPL_ENDOFNAMES: &str = "366";
pub const RPL_LINKS: &str = "364";
pub const RPL_ENDOFLINKS: &str = "365";
pub const RPL_BANLIST: &str = "367";
pub const RPL_ENDOFBANLIST: &str = "368";
pub const RPL_INFO: &str = "371";
pub const RPL_ENDOFINFO: &str = "374";
pub const RPL_MOTDSTART: &str = "375";
pub const RPL_MOTD: &str = "372";
pub const RPL_ENDOFMOTD: &str = "376";
pub const RPL_YOUREOPER: &str = "381";
pub const RPL_REHASHING: &str = "382";
pub const RPL_YOURESERVICE: &str = "383";
pub const RPL_TIME: &str = "391";
pub const RPL_USERSSTART: &str = "392";
pub const RPL_USERS: &str = "393";
pub const RPL_ENDOFUSERS: &str = "394";
pub const RPL_NOUSERS: &str = "395";
pub const RPL_TRACELINK: &str = "200";
pub const RPL_TRACECONNECTING: &str = "201";
pub const RPL_TRACEHANDSHAKE: &str = "202";
pub const RPL_TRACEUNKNOWN: &str = "203";
pub const RPL_TRACEOPERATOR: &str = "204";
pub const RPL_TRACEUSER: &str = "205";
pub const RPL_TRACESERVER: &str = "206";
pub const RPL_TRACESERVICE: &str = "207";
pub const RPL_TRACENEWTYPE: &str = "208";
pub const RPL_TRACECLASS: &str = "209";
pub const RPL_TRACERECONNECT: &str = "210";
pub const RPL_TRACELOG: &str = "261";
pub const RPL_TRACEEND: &str = "262";
pub const RPL_STATSLINKINFO: &str = "211";
pub const RPL_STATSCOMMANDS: &str = "212";
pub const RPL_ENDOFSTATS: &str = "219";
pub const RPL_STATSUPTIME: &str = "242";
pub const RPL_STATSOLINE: &str = "243";
pub const RPL_UMODEIS: &str = "221";
pub const RPL_SERVLIST: &str = "234";
pub const RPL_SERVLISTEND: &str = "235";
pub const RPL_LUSERCLIENT: &str = "251";
pub const RPL_LUSEROP: &str = "252";
pub const RPL_LUSERUNKNOWN: &str = "253";
pub const RPL_LUSERCHANNELS: &str = "254";
pub const RPL_LUSERME: &str = "255";
pub const RPL_ADMINME: &str = "256";
pub const RPL_ADMINLOC1: &str = "257";
pub const RPL_ADMINLOC2: &str = "258";
pub const RPL_ADMINEMAIL: &str = "259";
pub const RPL_TRYAGAIN: &str = "263";
pub const ERR_NOSUCHNICK: &str = "401";
pub const ERR_NOSUCHSERVER: &str = "402";
pub const ERR_NOSUCHCHANNEL: &str = "403";
pub const ERR_CANNOTSENDTOCHAN: &str = "404";
pub const ERR_TOOMANYCHANNELS: &str = "405";
pub const ERR_WASNOSUCHNICK: &str = "406";
pub const ERR_TOOMANYTARGETS: &str = "407";
pub const ERR_NOSUCHSERVICE: &str = "408";
pub const ERR_NOORIGIN: &str = "409";
pub const ERR_NORECIPIENT: &str = "411";
pub const ERR_NOTEXTTOSEND: &str = "412";
pub const ERR_NOTOPLEVEL: &str = "413";
pub const ERR_WILDTOPLEVEL: &str = "414";
pub const ERR_BADMASK: &str = "415";
pub const ERR_UNKNOWNCOMMAND: &str = "421";
pub const ERR_NOMOTD: &str = "422";
pub const ERR_NOADMININFO: &str = "423";
pub const ERR_FILEERROR: &str = "424";
pub const ERR_NONICKNAMEGIVEN: &str = "431";
pub const ERR_ERRONEUSNICKNAME: &str = "432";
pub const ERR_NICKNAMEINUSE: &str = "433";
pub const ERR_NICKCOLLISION: &str = "436";
pub const ERR_UNAVAILRESOURCE: &str = "437";
pub const ERR_USERNOTINCHANNEL: &str = "441";
pub const ERR_NOTONCHANNEL: &str = "442";
pub const ERR_USERONCHANNEL: &str = "443";
pub const ERR_NOLOGIN: &str = "444";
pub const ERR_SUMMONDISABLED: &str = "445";
pub const ERR_USERSDISABLED: &str = "446";
pub const ERR_NOTREGISTERED: &str = "451";
pub const ERR_NEEDMOREPARAMS: &str = "461";
pub const ERR_ALREADYREGISTRED: &str = "462";
pub const ERR_NOPERMFORHOST: &str = "463";
pub const ERR_PASSWDMISMATCH: &str = "464";
pub const ERR_YOUREBANNEDCREEP: &str = "465";
pub const ERR_YOUWILLBEBANNED: &str = "466";
pub const ERR_KEYSET: &str = "467";
pub const ERR_CHANNELISFULL: &str = "471";
pub const ERR_UNKNOWNMODE: &str = "472";
pub const ERR_INVITEONLYCHAN: &str = "473";
pub const ERR_BANNEDFROMCHAN: &str = "474";
pub const ERR_BADCHANNELKEY: &str = "475";
pub const ERR_BADCHANMASK: &str = "476";
pub const ERR_NOCHANMODES: &str = "477";
pub const ERR_BANLISTFULL: &str = "478";
pub const ERR_NOPRIVILEGES: &str = "481";
pub const ERR_CHANOPRIVSNEEDED: &str = "482";
pub const ERR_CANTKILLSERVER: &str = "483";
pub const ERR_RESTRICTED: &str = "484";
pub const ERR_UNIQOPPRIVSNEEDED: &str = "485";
pub const ERR_NOOPERHOST: &str = "491";
pub const ERR_UMODEUNKNOWNFLAG: &str = "501";
pub const ERR_USERSDONTMATCH: &str = "502";

/// Returns the symbolic name of a command verb or numeric reply.
///
/// Verbs map to themselves; numerics map to their RFC 2812 name
/// (`"433"` → `"ERR_NICKNAMEINUSE"`). Unknown commands return `None`.
pub fn command_name(command: &str) -> Option<&'static str> {
    let name = match command {
        PASS => "PASS",
        NICK => "NICK",
        USER => "USER",
        OPER => "OPER",
        MODE => "MODE",
        SERVICE => "SERVICE",
        QUIT => "QUIT",
        SQUIT => "SQUIT",
        JOIN => "JOIN",
        PART => "PART",
        TOPIC => "TOPIC",
        NAMES => "NAMES",
        LIST => "LIST",
        INVITE => "INVITE",
        KICK => "KICK",
        PRIVMSG => "PRIVMSG",
        NOTICE => "NOTICE",
        MOTD => "MOTD",
        LUSERS => "LUSERS",
        VERSION => "VERSION",
        STATS => "STATS",
        LINKS => "LINKS",
        TIME => "TIME",
        CONNECT => "CONNECT",
        TRACE => "TRACE",
        ADMIN => "ADMIN",
        INFO => "INFO",
        SERVLIST => "SERVLIST",
        SQUERY => "SQUERY",
        WHO => "WHO",
        WHOIS => "WHOIS",
        WHOWAS => "WHOWAS",
        KILL => "KILL",
        PING => "PING",
        PONG => "PONG",
        ERROR => "ERROR",
        AWAY => "AWAY",
        REHASH => "REHASH",
        DIE => "DIE",
        RESTART => "RESTART",
        SUMMON => "SUMMON",
        USERS => "USERS",
        WALLOPS => "WALLOPS",
        USERHOST => "USERHOST",
        ISON => "ISON",
        RPL_WELCOME => "RPL_WELCOME",
        RPL_YOURHOST => "RPL_YOURHOST",
        RPL_CREATED => "RPL_CREATED",
        RPL_MYINFO => "RPL_MYINFO",
        RPL_BOUNCE => "RPL_BOUNCE",
        RPL_USERHOST => "RPL_USERHOST",
        RPL_ISON => "RPL_ISON",
        RPL_AWAY => "RPL_AWAY",
        RPL_UNAWAY => "RPL_UNAWAY",
        RPL_NOWAWAY => "RPL_NOWAWAY",
        RPL_WHOISUSER => "RPL_WHOISUSER",
        RPL_WHOISSERVER => "RPL_WHOISSERVER",
        RPL_WHOISOPERATOR => "RPL_WHOISOPERATOR",
        RPL_WHOISIDLE => "RPL_WHOISIDLE",
        RPL_ENDOFWHOIS => "RPL_ENDOFWHOIS",
        RPL_WHOISCHANNELS => "RPL_WHOISCHANNELS",
        RPL_WHOWASUSER => "RPL_WHOWASUSER",
        RPL_ENDOFWHOWAS => "RPL_ENDOFWHOWAS",
        RPL_LISTSTART => "RPL_LISTSTART",
        RPL_LIST => "RPL_LIST",
        RPL_LISTEND => "RPL_LISTEND",
        RPL_UNIQOPIS => "RPL_UNIQOPIS",
        RPL_CHANNELMODEIS => "RPL_CHANNELMODEIS",
        RPL_NOTOPIC => "RPL_NOTOPIC",
        RPL_TOPIC => "RPL_TOPIC",
        RPL_TOPICWHOTIME => "RPL_TOPICWHOTIME",
        RPL_INVITING => "RPL_INVITING",
        RPL_SUMMONING => "RPL_SUMMONING",
        RPL_INVITELIST => "RPL_INVITELIST",
        RPL_ENDOFINVITELIST => "RPL_ENDOFINVITELIST",
        RPL_EXCEPTLIST => "RPL_EXCEPTLIST",
        RPL_ENDOFEXCEPTLIST => "RPL_ENDOFEXCEPTLIST",
        RPL_VERSION => "RPL_VERSION",
        RPL_WHOREPLY => "RPL_WHOREPLY",
        RPL_ENDOFWHO => "RPL_ENDOFWHO",
        RPL_NAMREPLY => "RPL_NAMREPLY",
        RPL_ENDOFNAMES => "RPL_ENDOFNAMES",
        RPL_LINKS => "RPL_LINKS",
        RPL_ENDOFLINKS => "RPL_ENDOFLINKS",
        RPL_BANLIST => "RPL_BANLIST",
        RPL_ENDOFBANLIST => "RPL_ENDOFBANLIST",
        RPL_INFO => "RPL_INFO",
        RPL_ENDOFINFO => "RPL_ENDOFINFO",
        RPL_MOTDSTART => "RPL_MOTDSTART",
        RPL_MOTD => "RPL_MOTD",
        RPL_ENDOFMOTD => "RPL_ENDOFMOTD",
        RPL_YOUREOPER => "RPL_YOUREOPER",
        RPL_REHASHING => "RPL_REHASHING",
        RPL_YOURESERVICE => "RPL_YOURESERVICE",
        RPL_TIME => "RPL_TIME",
        RPL_USERSSTART => "RPL_USERSSTART",
        RPL_USERS => "RPL_USERS",
        RPL_ENDOFUSERS => "RPL_ENDOFUSERS",
        RPL_NOUSERS => "RPL_NOUSERS",
        RPL_TRACELINK => "RPL_TRACELINK",
        RPL_TRACECONNECTING => "RPL_TRACECONNECTING",
        RPL_TRACEHANDSHAKE => "RPL_TRACEHANDSHAKE",
        RPL_TRACEUNKNOWN => "RPL_TRACEUNKNOWN",
        RPL_TRACEOPERATOR => "RPL_TRACEOPERATOR",
        RPL_TRACEUSER => "RPL_TRACEUSER",
        RPL_TRACESERVER => "RPL_TRACESERVER",
        RPL_TRACESERVICE => "RPL_TRACESERVICE",
        RPL_TRACENEWTYPE => "RPL_TRACENEWTYPE",
        RPL_TRACECLASS => "RPL_TRACECLASS",
        RPL_TRACERECONNECT => "RPL_TRACERECONNECT",
        RPL_TRACELOG => "RPL_TRACELOG",
        RPL_TRACEEND => "RPL_TRACEEND",
        RPL_STATSLINKINFO => "RPL_STATSLINKINFO",
        RPL_STATSCOMMANDS => "RPL_STATSCOMMANDS",
        RPL_ENDOFSTATS => "RPL_ENDOFSTATS",
        RPL_STATSUPTIME => "RPL_STATSUPTIME",
        RPL_STATSOLINE => "RPL_STATSOLINE",
        RPL_UMODEIS => "RPL_UMODEIS",
        RPL_SERVLIST => "RPL_SERVLIST",
        RPL_SERVLISTEND => "RPL_SERVLISTEND",
        RPL_LUSERCLIENT => "RPL_LUSERCLIENT",
        RPL_LUSEROP => "RPL_LUSEROP",
        RPL_LUSERUNKNOWN => "RPL_LUSERUNKNOWN",
        RPL_LUSERCHANNELS => "RPL_LUSERCHANNELS",
        RPL_LUSERME => "RPL_LUSERME",
        RPL_ADMINME => "RPL_ADMINME",
        RPL_ADMINLOC1 => "RPL_ADMINLOC1",
        RPL_ADMINLOC2 => "RPL_ADMINLOC2",
        RPL_ADMINEMAIL => "RPL_ADMINEMAIL",
        RPL_TRYAGAIN => "RPL_TRYAGAIN",
        ERR_NOSUCHNICK => "ERR_NOSUCHNICK",
        ERR_NOSUCHSERVER => "ERR_NOSUCHSERVER",
        ERR_NOSUCHCHANNEL => "ERR_NOSUCHCHANNEL",
        ERR_CANNOTSENDTOCHAN => "ERR_CANNOTSENDTOCHAN",
        ERR_TOOMANYCHANNELS => "ERR_TOOMANYCHANNELS",
        ERR_WASNOSUCHNICK => "ERR_WASNOSUCHNICK",
        ERR_TOOMANYTARGETS => "ERR_TOOMANYTARGETS",
        ERR_NOSUCHSERVICE => "ERR_NOSUCHSERVICE",
        ERR_NOORIGIN => "ERR_NOORIGIN",
        ERR_NORECIPIENT => "ERR_NORECIPIENT",
        ERR_NOTEXTTOSEND => "ERR_NOTEXTTOSEND",
        ERR_NOTOPLEVEL => "ERR_NOTOPLEVEL",
        ERR_WILDTOPLEVEL => "ERR_WILDTOPLEVEL",
        ERR_BADMASK => "ERR_BADMASK",
        ERR_UNKNOWNCOMMAND => "ERR_UNKNOWNCOMMAND",
        ERR_NOMOTD => "ERR_NOMOTD",
        ERR_NOADMININFO => "ERR_NOADMININFO",
        ERR_FILEERROR => "ERR_FILEERROR",
        ERR_NONICKNAMEGIVEN => "ERR_NONICKNAMEGIVEN",
        ERR_ERRONEUSNICKNAME => "ERR_ERRONEUSNICKNAME",
        ERR_NICKNAMEINUSE => "ERR_NICKNAMEINUSE",
        ERR_NICKCOLLISION => "ERR_NICKCOLLISION",
        ERR_UNAVAILRESOURCE => "ERR_UNAVAILRESOURCE",
        ERR_USERNOTINCHANNEL => "ERR_USERNOTINCHANNEL",
        ERR_NOTONCHANNEL => "ERR_NOTONCHANNEL",
        ERR_USERONCHANNEL => "ERR_USERONCHANNEL",
        ERR_NOLOGIN => "ERR_NOLOGIN",
        ERR_SUMMONDISABLED => "ERR_SUMMONDISABLED",
        ERR_USERSDISABLED => "ERR_USERSDISABLED",
        ERR_NOTREGISTERED => "ERR_NOTREGISTERED",
        ERR_NEEDMOREPARAMS => "ERR_NEEDMOREPARAMS",
        ERR_ALREADYREGISTRED => "ERR_ALREADYREGISTRED",
        ERR_NOPERMFORHOST => "ERR_NOPERMFORHOST",
        ERR_PASSWDMISMATCH => "ERR_PASSWDMISMATCH",
        ERR_YOUREBANNEDCREEP => "ERR_YOUREBANNEDCREEP",
        ERR_YOUWILLBEBANNED => "ERR_YOUWILLBEBANNED",
        ERR_KEYSET => "ERR_KEYSET",
        ERR_CHANNELISFULL => "ERR_CHANNELISFULL",
        ERR_UNKNOWNMODE => "ERR_UNKNOWNMODE",
        ERR_INVITEONLYCHAN => "ERR_INVITEONLYCHAN",
        ERR_BANNEDFROMCHAN => "ERR_BANNEDFROMCHAN",
        ERR_BADCHANNELKEY => "ERR_BADCHANNELKEY",
        ERR_BADCHANMASK => "ERR_BADCHANMASK",
        ERR_NOCHANMODES => "ERR_NOCHANMODES",
        ERR_BANLISTFULL => "ERR_BANLISTFULL",
        ERR_NOPRIVILEGES => "ERR_NOPRIVILEGES",
        ERR_CHANOPRIVSNEEDED => "ERR_CHANOPRIVSNEEDED",
        ERR_CANTKILLSERVER => "ERR_CANTKILLSERVER",
        ERR_RESTRICTED => "ERR_RESTRICTED",
        ERR_UNIQOPPRIVSNEEDED => "ERR_UNIQOPPRIVSNEEDED",
        ERR_NOOPERHOST => "ERR_NOOPERHOST",
        ERR_UMODEUNKNOWNFLAG => "ERR_UMODEUNKNOWNFLAG",
        ERR_USERSDONTMATCH => "ERR_USERSDONTMATCH",
        _ => return None,
    };
    Some(name)
}

/// Returns true for the numeric replies that abort registration.
pub fn is_registration_failure(command: &str) -> bool {
    matches!(
        command,
        ERR_NONICKNAMEGIVEN
            | ERR_ERRONEUSNICKNAME
            | ERR_NICKNAMEINUSE
            | ERR_NICKCOLLISION
            | ERR_UNAVAILRESOURCE
            | ERR_RESTRICTED
            | ERR_NEEDMOREPARAMS
            | ERR_ALREADYREGISTRED
    )
}
